use crate::error::{BotError, BotResult};
use crate::models::{FilterResult, NotificationMessage, Session};
use crate::utils::datetime::{format_day_header, format_start_time, format_timestamp};

/// Telegram caps message text at 4096 characters.
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

/// Escapes the characters with special meaning in Telegram's HTML parse mode.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Renders a `FilterResult` into the notification message.
///
/// Sessions are sorted by start time and grouped by day. The trailer with the
/// run timing is always appended, including for an empty result. Deterministic
/// for a fixed input.
pub fn format_summary(
    result: &FilterResult,
    chat_id: Option<&str>,
) -> BotResult<NotificationMessage> {
    for session in &result.sessions {
        if session.name.trim().is_empty() {
            return Err(BotError::Format(format!(
                "session {} has no class name",
                session.token
            )));
        }
    }

    let mut sorted: Vec<&Session> = result.sessions.iter().collect();
    sorted.sort_by_key(|s| s.start_time);

    let mut html_lines: Vec<String> = Vec::new();
    let mut text_lines: Vec<String> = Vec::new();

    if sorted.is_empty() {
        html_lines.push("<b>No sessions available in the selected window.</b>".to_string());
        text_lines.push("No sessions available in the selected window.".to_string());
    } else {
        html_lines.push("<b>🏋️ Class slots are open!</b>".to_string());
        html_lines.push(String::new());
        text_lines.push("🏋️ Class slots are open!".to_string());
        text_lines.push(String::new());

        let mut current_day = None;
        for session in sorted {
            let day = session.start_time.date_naive();
            if current_day != Some(day) {
                if current_day.is_some() {
                    html_lines.push(String::new());
                    text_lines.push(String::new());
                }
                let header = format_day_header(&session.start_time);
                html_lines.push(format!("<b>📅 {}</b>", escape_html(&header)));
                text_lines.push(format!("📅 {}", header));
                current_day = Some(day);
            }

            let time_label = format_start_time(&session.start_time);
            let slots = match session.available_spots {
                1 => "1 slot left".to_string(),
                n => format!("{} slots left", n),
            };
            let instructor = session.instructor_label.trim();

            let mut html_line = format!(
                "🕒 <b>{}</b> • {} • {}",
                escape_html(&time_label),
                escape_html(&session.name),
                slots
            );
            let mut text_line = format!("🕒 {} • {} • {}", time_label, session.name, slots);
            if !instructor.is_empty() {
                html_line.push_str(&format!(" • 👤 {}", escape_html(instructor)));
                text_line.push_str(&format!(" • 👤 {}", instructor));
            }
            html_lines.push(html_line);
            text_lines.push(text_line);
        }
    }

    let trailer = format!(
        "Run started {} | finished {} | took {:.2}s",
        format_timestamp(&result.started_at),
        format_timestamp(&result.finished_at),
        result.elapsed_seconds
    );
    html_lines.push(String::new());
    html_lines.push(format!("<i>{}</i>", escape_html(&trailer)));
    text_lines.push(String::new());
    text_lines.push(trailer);

    Ok(NotificationMessage {
        html: html_lines.join("\n"),
        plain_text: text_lines.join("\n"),
        chat_id: chat_id.map(str::to_string),
    })
}

/// Splits a message into chunks Telegram accepts, breaking on line
/// boundaries. A single line longer than the limit is sliced directly.
pub fn split_message(message: &str) -> Vec<String> {
    split_with_limit(message, TELEGRAM_MESSAGE_LIMIT)
}

fn split_with_limit(message: &str, limit: usize) -> Vec<String> {
    if message.chars().count() <= limit {
        return vec![message.to_string()];
    }

    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for line in message.split('\n') {
        let line_len = line.chars().count();

        if line_len > limit {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let mut rest: Vec<char> = line.chars().collect();
            while !rest.is_empty() {
                let take = rest.len().min(limit);
                chunks.push(rest[..take].iter().collect());
                rest.drain(..take);
            }
            continue;
        }

        let additional = if current.is_empty() {
            line_len
        } else {
            line_len + 1
        };
        if !current.is_empty() && current_len + additional > limit {
            chunks.push(std::mem::take(&mut current));
            current.push_str(line);
            current_len = line_len;
        } else {
            if !current.is_empty() {
                current.push('\n');
                current_len += 1;
            }
            current.push_str(line);
            current_len += line_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
