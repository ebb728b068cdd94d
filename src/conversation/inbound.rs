/// Prefix of the callback payload that selects a search result.
pub const SELECT_PREFIX: &str = "movie_";
/// Callback payload of the "View My Stats" button.
pub const STATS_PAYLOAD: &str = "stats";

/// One event from the chat, already stripped of transport details.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    Command(BotCommand),
    /// Plain text, treated as a search.
    Text(String),
    Callback(CallbackAction),
}

#[derive(Debug, Clone, PartialEq)]
pub enum BotCommand {
    Start,
    Help,
    /// `/search` and whatever followed it, possibly empty.
    Search(String),
    Stats,
    Clear,
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CallbackAction {
    SelectMovie(String),
    Stats,
}

/// Classify a text message. Blank messages produce nothing.
pub fn parse_message(text: &str) -> Option<Inbound> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let Some(command_line) = text.strip_prefix('/') else {
        return Some(Inbound::Text(text.to_string()));
    };

    let (head, rest) = match command_line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (command_line, ""),
    };
    // `/search@SomeBot` in group chats.
    let name = head.split('@').next().unwrap_or(head).to_ascii_lowercase();

    let command = match name.as_str() {
        "start" => BotCommand::Start,
        "help" => BotCommand::Help,
        "search" => BotCommand::Search(rest.to_string()),
        "stats" => BotCommand::Stats,
        "clear" => BotCommand::Clear,
        _ => BotCommand::Unknown(name),
    };
    Some(Inbound::Command(command))
}

/// Decode a button payload. Anything unrecognised is `None` and is ignored.
pub fn parse_callback(data: &str) -> Option<CallbackAction> {
    if data == STATS_PAYLOAD {
        return Some(CallbackAction::Stats);
    }
    let id = data.strip_prefix(SELECT_PREFIX)?;
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(CallbackAction::SelectMovie(id.to_string()))
}

pub fn select_payload(external_id: &str) -> String {
    format!("{}{}", SELECT_PREFIX, external_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_search() {
        assert_eq!(
            parse_message("  The Matrix "),
            Some(Inbound::Text("The Matrix".into()))
        );
        assert_eq!(parse_message("   "), None);
    }

    #[test]
    fn test_search_command_with_args() {
        assert_eq!(
            parse_message("/search Blade   Runner"),
            Some(Inbound::Command(BotCommand::Search("Blade   Runner".into())))
        );
        assert_eq!(
            parse_message("/search"),
            Some(Inbound::Command(BotCommand::Search(String::new())))
        );
    }

    #[test]
    fn test_command_with_bot_suffix() {
        assert_eq!(
            parse_message("/Stats@movie_helper_bot"),
            Some(Inbound::Command(BotCommand::Stats))
        );
        assert_eq!(
            parse_message("/clear@movie_helper_bot now"),
            Some(Inbound::Command(BotCommand::Clear))
        );
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            parse_message("/frobnicate"),
            Some(Inbound::Command(BotCommand::Unknown("frobnicate".into())))
        );
    }

    #[test]
    fn test_callbacks() {
        assert_eq!(
            parse_callback("movie_tt0133093"),
            Some(CallbackAction::SelectMovie("tt0133093".into()))
        );
        assert_eq!(parse_callback("stats"), Some(CallbackAction::Stats));
    }

    #[test]
    fn test_foreign_callbacks_are_ignored() {
        assert_eq!(parse_callback("movie_"), None);
        assert_eq!(parse_callback("movie_tt1_extra"), None);
        assert_eq!(parse_callback("page_2"), None);
        assert_eq!(parse_callback(""), None);
    }

    #[test]
    fn test_select_payload_round_trips() {
        assert_eq!(
            parse_callback(&select_payload("tt1375666")),
            Some(CallbackAction::SelectMovie("tt1375666".into()))
        );
    }
}
