/// A shell command parsed from one input line
#[derive(Debug, PartialEq)]
pub enum Command {
    Quit,
    Help,
    Pwd,
    Ls(Option<String>),
    Cd(String),
    Mkdir(String),
    Put(String, String),
    Cat(String),
    Stat(String),
    Rm(String),
    Rmr(String),
    Unknown(String),
}

// Parse raw command string into Command enum
pub fn parse_command(raw: &str) -> Command {
    let trimmed = raw.trim();
    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or("").to_ascii_uppercase();
    let arg = parts.next().unwrap_or("").trim();

    match cmd.as_str() {
        "QUIT" | "Q" => Command::Quit,
        "HELP" => Command::Help,
        "PWD" => Command::Pwd,
        "LS" if arg.is_empty() => Command::Ls(None),
        "LS" => Command::Ls(Some(arg.to_string())),
        "CD" if !arg.is_empty() => Command::Cd(arg.to_string()),
        "MKDIR" if !arg.is_empty() => Command::Mkdir(arg.to_string()),
        "CAT" if !arg.is_empty() => Command::Cat(arg.to_string()),
        "STAT" if !arg.is_empty() => Command::Stat(arg.to_string()),
        "RM" if !arg.is_empty() => Command::Rm(arg.to_string()),
        "RMR" if !arg.is_empty() => Command::Rmr(arg.to_string()),
        "PUT" if !arg.is_empty() => {
            let mut put = arg.splitn(2, char::is_whitespace);
            let path = put.next().unwrap_or("").to_string();
            let text = put.next().unwrap_or("").trim_start().to_string();
            Command::Put(path, text)
        }
        _ => Command::Unknown(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_commands() {
        assert_eq!(parse_command("QUIT"), Command::Quit);
        assert_eq!(parse_command("q"), Command::Quit);
        assert_eq!(parse_command("HELP"), Command::Help);
        assert_eq!(parse_command("pwd"), Command::Pwd);
        assert_eq!(parse_command("LS"), Command::Ls(None));
    }

    #[test]
    fn test_parse_commands_with_args() {
        assert_eq!(
            parse_command("mkdir /test/hadoop"),
            Command::Mkdir("/test/hadoop".to_string())
        );
        assert_eq!(
            parse_command("LS gs://bucket/dir"),
            Command::Ls(Some("gs://bucket/dir".to_string()))
        );
        assert_eq!(parse_command("CD sub"), Command::Cd("sub".to_string()));
        assert_eq!(parse_command("RMR /a"), Command::Rmr("/a".to_string()));
        assert_eq!(
            parse_command("PUT /a/note.txt hello  world"),
            Command::Put("/a/note.txt".to_string(), "hello  world".to_string())
        );
        assert_eq!(
            parse_command("PUT /a/empty"),
            Command::Put("/a/empty".to_string(), String::new())
        );
    }

    #[test]
    fn test_missing_arguments_are_unknown() {
        assert_eq!(parse_command("MKDIR"), Command::Unknown("MKDIR".to_string()));
        assert_eq!(parse_command("cat   "), Command::Unknown("cat".to_string()));
        assert_eq!(parse_command(""), Command::Unknown("".to_string()));
        assert_eq!(
            parse_command("FOO bar"),
            Command::Unknown("FOO bar".to_string())
        );
    }
}
