use client_core::{format_timestamp, ClientState};

pub const TITLE: &str = "Hello World Web App";
pub const SUBTITLE: &str = "Vue 3.js Frontend + FastAPI Backend";

pub fn header() -> String {
    format!("{TITLE}\n{SUBTITLE}")
}

pub fn render(state: &ClientState) -> String {
    let name = if state.user_name.is_empty() {
        "(none)"
    } else {
        state.user_name.as_str()
    };

    format!(
        "message : {}\ncounter : {}\nbackend : {}\nname    : {name}\ngreeting: {}",
        state.messages.current(),
        state.counter.value(),
        state.status,
        greeting_line(state),
    )
}

fn greeting_line(state: &ClientState) -> String {
    if state.loading {
        return "loading...".to_string();
    }
    if let Some(error) = &state.error {
        return error.clone();
    }
    let Some(payload) = &state.api_response else {
        return "(none)".to_string();
    };

    let message = payload
        .message()
        .map(str::to_string)
        .unwrap_or_else(|| payload.as_json().to_string());
    match payload.timestamp() {
        Some(ts) => {
            let at = format_timestamp(ts).unwrap_or_else(|| "Invalid Date".to_string());
            format!("{message} (received {at})")
        }
        None => message,
    }
}
