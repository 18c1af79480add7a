//! MyST markup for theme-toggled images.
//!
//! The static site toggles between the two images with Tailwind classes:
//! `dark:hidden` shows the black image on light pages, `hidden dark:block`
//! shows the white image on dark pages.

use duo_ast::Block;
use duo_diagrams::{RenderedPair, Theme};

/// Raw block format of emitted markup.
pub const MARKUP_FORMAT: &str = "markdown";

/// Raw block formats that may carry theme-toggle markup.
const THEME_BLOCK_FORMATS: [&str; 3] = ["html", "markdown", "gfm"];

/// Class of the image shown on light pages.
const LIGHT_PAGE_CLASS: &str = "dark:hidden";

/// Class of the image shown on dark pages.
const DARK_PAGE_CLASS: &str = "hidden dark:block";

fn toggle_class(theme: Theme) -> &'static str {
    match theme {
        Theme::Black => LIGHT_PAGE_CLASS,
        Theme::White => DARK_PAGE_CLASS,
    }
}

/// One `:::{div}` directive showing `link` only in the theme's mode.
fn theme_div(theme: Theme, link: &str) -> String {
    format!(":::{{div}}\n:class: {}\n![]({link})\n:::\n", toggle_class(theme))
}

/// The two sibling theme blocks, black first.
#[must_use]
pub fn theme_blocks(pair: &RenderedPair) -> [Block; 2] {
    [
        Block::raw(MARKUP_FORMAT, theme_div(Theme::Black, &pair.black)),
        Block::raw(MARKUP_FORMAT, theme_div(Theme::White, &pair.white)),
    ]
}

/// A `::::{figure}` directive wrapping both theme divs and the caption.
#[must_use]
pub fn figure_block(pair: &RenderedPair, label: &str, caption: &str) -> Block {
    let mut lines = vec!["::::{figure}".to_owned()];
    if !label.is_empty() {
        lines.push(format!(":label: {label}"));
    }
    lines.push(format!(":alt: {caption}"));
    lines.push(String::new());
    lines.push(theme_div(Theme::Black, &pair.black));
    lines.push(theme_div(Theme::White, &pair.white));
    lines.push(caption.to_owned());
    lines.push("::::".to_owned());

    Block::raw(MARKUP_FORMAT, lines.join("\n") + "\n")
}

/// Whether `block` is a previously emitted theme-toggle block.
#[must_use]
pub fn is_theme_block(block: &Block) -> bool {
    match block {
        Block::RawBlock(format, text) => {
            THEME_BLOCK_FORMATS.contains(&format.as_str())
                && (text.contains(LIGHT_PAGE_CLASS) || text.contains(DARK_PAGE_CLASS))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pair() -> RenderedPair {
        RenderedPair {
            black: "media/1_1_1_h_black.svg".to_owned(),
            white: "media/1_1_1_h_white.svg".to_owned(),
        }
    }

    #[test]
    fn test_theme_blocks() {
        let [black, white] = theme_blocks(&pair());

        assert_eq!(
            black,
            Block::raw(
                "markdown",
                ":::{div}\n:class: dark:hidden\n![](media/1_1_1_h_black.svg)\n:::\n"
            )
        );
        assert_eq!(
            white,
            Block::raw(
                "markdown",
                ":::{div}\n:class: hidden dark:block\n![](media/1_1_1_h_white.svg)\n:::\n"
            )
        );
    }

    #[test]
    fn test_figure_block_with_label() {
        let block = figure_block(&pair(), "fig:circuit1", "A simple circuit");

        let expected = "\
::::{figure}
:label: fig:circuit1
:alt: A simple circuit

:::{div}
:class: dark:hidden
![](media/1_1_1_h_black.svg)
:::

:::{div}
:class: hidden dark:block
![](media/1_1_1_h_white.svg)
:::

A simple circuit
::::
";
        assert_eq!(block, Block::raw("markdown", expected));
    }

    #[test]
    fn test_figure_block_without_label() {
        let Block::RawBlock(_, text) = figure_block(&pair(), "", "Caption") else {
            panic!("expected RawBlock");
        };
        assert!(text.starts_with("::::{figure}\n:alt: Caption\n\n:::{div}"));
        assert!(!text.contains(":label:"));
    }

    #[test]
    fn test_is_theme_block() {
        let [black, white] = theme_blocks(&pair());
        assert!(is_theme_block(&black));
        assert!(is_theme_block(&white));
        assert!(is_theme_block(&Block::raw(
            "html",
            "<div class=\"hidden dark:block\"></div>"
        )));
        assert!(is_theme_block(&figure_block(&pair(), "", "c")));
    }

    #[test]
    fn test_is_theme_block_rejects_other_formats() {
        assert!(!is_theme_block(&Block::raw("latex", "dark:hidden")));
        assert!(!is_theme_block(&Block::raw("markdown", "plain text")));
        assert!(!is_theme_block(&Block::HorizontalRule));
    }
}
