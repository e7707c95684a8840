//! Serialization of classified blocks into termynal widget markup.
//!
//! The attribute names and classes here are the compatibility surface with
//! the front-end styling and animation code; they must not change.

use crate::parsing::Block;

/// Renders blocks into one dense markup fragment.
///
/// One container `<div>` wraps one `<span>` per block, concatenated without
/// separators so the fragment does not disturb whitespace-sensitive markdown
/// around it. Block text is expected to be HTML-escaped already; command
/// lines keep raw newlines while output lines get explicit `<br>` breaks.
pub fn render(title: Option<&str>, blocks: &[Block]) -> String {
    let mut out = match title {
        Some(title) => {
            format!("<div class=\"termy\" data-termynal data-ty-title=\"{title}\">")
        }
        None => String::from("<div class=\"termy\">"),
    };

    for block in blocks {
        match block {
            Block::Command { prompt, lines } => {
                let lines = lines.join("\n");
                out.push_str(&format!(
                    "<span data-ty=\"input\" data-ty-prompt=\"{prompt}\">{lines}</span>"
                ));
            }
            Block::Comment { lines } => {
                let lines = lines.join("\n");
                out.push_str(&format!(
                    "<span class=\"termynal-comment\" data-ty>{lines}</span>"
                ));
            }
            Block::Progress => {
                out.push_str("<span data-ty=\"progress\"></span>");
            }
            Block::Output { lines } => {
                let lines = lines.join("<br>");
                out.push_str(&format!("<span data-ty>{lines}</span>"));
            }
        }
    }

    out.push_str("</div>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn container_without_title() {
        assert_eq!(render(None, &[]), "<div class=\"termy\"></div>");
    }

    #[test]
    fn container_with_title() {
        assert_eq!(
            render(Some("bash"), &[]),
            "<div class=\"termy\" data-termynal data-ty-title=\"bash\"></div>"
        );
    }

    #[test]
    fn command_lines_join_with_raw_newline() {
        let blocks = vec![Block::Command {
            prompt: "$".to_string(),
            lines: vec!["echo a \\".to_string(), "echo b".to_string()],
        }];
        assert_eq!(
            render(None, &blocks),
            "<div class=\"termy\">\
             <span data-ty=\"input\" data-ty-prompt=\"$\">echo a \\\necho b</span>\
             </div>"
        );
    }

    #[test]
    fn comment_renders_with_its_marker() {
        let blocks = vec![Block::Comment {
            lines: vec!["# a note".to_string()],
        }];
        assert_eq!(
            render(None, &blocks),
            "<div class=\"termy\"><span class=\"termynal-comment\" data-ty># a note</span></div>"
        );
    }

    #[test]
    fn progress_is_an_empty_span() {
        assert_eq!(
            render(None, &[Block::Progress]),
            "<div class=\"termy\"><span data-ty=\"progress\"></span></div>"
        );
    }

    #[test]
    fn output_lines_join_with_visual_breaks() {
        let blocks = vec![Block::Output {
            lines: vec!["one".to_string(), "two".to_string()],
        }];
        assert_eq!(
            render(None, &blocks),
            "<div class=\"termy\"><span data-ty>one<br>two</span></div>"
        );
    }

    #[test]
    fn blocks_concatenate_without_separators() {
        let blocks = vec![
            Block::Command {
                prompt: "$".to_string(),
                lines: vec!["make".to_string()],
            },
            Block::Progress,
            Block::Output {
                lines: vec!["ok".to_string()],
            },
        ];
        assert_eq!(
            render(Some("build"), &blocks),
            "<div class=\"termy\" data-termynal data-ty-title=\"build\">\
             <span data-ty=\"input\" data-ty-prompt=\"$\">make</span>\
             <span data-ty=\"progress\"></span>\
             <span data-ty>ok</span>\
             </div>"
        );
    }
}
