//! Client-to-server line grammar.
//!
//! A command word is the text before the first space. Only `NICK` and `exit`
//! are commands; every other non-empty line is chat text.

const NICK: &str = "NICK";
const EXIT: &str = "exit";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `NICK <name>`; `name` is the first whitespace-delimited token after
    /// the command word, or empty when there is none. Extra tokens are ignored.
    Nick(String),
    /// `exit`
    Exit,
    /// Any other non-empty line.
    Chat(String),
    /// An empty line.
    Empty,
}

impl Command {
    /// Parse one line. A trailing `\n` or `\r\n` is stripped first.
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\n', '\r']);

        if line.is_empty() {
            return Command::Empty;
        }
        if line == EXIT {
            return Command::Exit;
        }

        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
        if word == NICK {
            let name = rest.split_whitespace().next().unwrap_or_default();
            return Command::Nick(name.to_string());
        }

        Command::Chat(line.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nick() {
        // テスト項目: NICK コマンドからニックネームが取り出される
        assert_eq!(Command::parse("NICK alice"), Command::Nick("alice".into()));
    }

    #[test]
    fn test_parse_nick_ignores_trailing_tokens() {
        // テスト項目: NICK の後の 2 つ目以降のトークンは無視される
        assert_eq!(
            Command::parse("NICK alice bob carol"),
            Command::Nick("alice".into())
        );
    }

    #[test]
    fn test_parse_nick_without_name() {
        // テスト項目: 名前のない NICK は空のニックネームになる
        assert_eq!(Command::parse("NICK"), Command::Nick(String::new()));
        assert_eq!(Command::parse("NICK "), Command::Nick(String::new()));
    }

    #[test]
    fn test_parse_nick_prefix_is_not_a_command() {
        // テスト項目: コマンド語が NICK と完全一致しない場合はチャット扱い
        assert_eq!(
            Command::parse("NICKNAME alice"),
            Command::Chat("NICKNAME alice".into())
        );
        assert_eq!(Command::parse("nick alice"), Command::Chat("nick alice".into()));
    }

    #[test]
    fn test_parse_exit() {
        // テスト項目: exit は完全一致のときだけコマンドになる
        assert_eq!(Command::parse("exit"), Command::Exit);
        assert_eq!(Command::parse("exit\r\n"), Command::Exit);
        assert_eq!(Command::parse("exit now"), Command::Chat("exit now".into()));
    }

    #[test]
    fn test_parse_empty_line() {
        // テスト項目: 空行（改行のみを含む）は Empty になる
        assert_eq!(Command::parse(""), Command::Empty);
        assert_eq!(Command::parse("\n"), Command::Empty);
        assert_eq!(Command::parse("\r\n"), Command::Empty);
    }

    #[test]
    fn test_parse_chat_text_is_verbatim() {
        // テスト項目: チャット本文は末尾の改行以外そのまま保持される
        assert_eq!(
            Command::parse("  hello  world \n"),
            Command::Chat("  hello  world ".into())
        );
    }
}
