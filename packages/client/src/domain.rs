//! Domain logic for client-side input handling.
//!
//! Pure functions with no I/O, so they are easy to test.

/// The command that ends the session on both sides.
pub const EXIT_COMMAND: &str = "exit";

/// Strip the trailing line terminator; everything else is forwarded as typed.
pub fn normalize_input(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

/// Check whether a (normalized) line asks the client to exit.
pub fn is_exit_command(line: &str) -> bool {
    line == EXIT_COMMAND
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_input_strips_newline_only() {
        // テスト項目: 末尾の改行だけが取り除かれ、空白はそのまま残る
        assert_eq!(normalize_input("hello\n"), "hello");
        assert_eq!(normalize_input("hello\r\n"), "hello");
        assert_eq!(normalize_input("  hello  \n"), "  hello  ");
    }

    #[test]
    fn test_is_exit_command() {
        // テスト項目: exit と完全一致する場合のみ終了コマンドと判定される
        assert!(is_exit_command("exit"));
        assert!(!is_exit_command("exit now"));
        assert!(!is_exit_command("EXIT"));
        assert!(!is_exit_command(" exit"));
    }
}
