//! ANSI- and Unicode-aware text utilities.
//!
//! Everything in this module measures text in terminal display cells, never
//! bytes or chars: ANSI escape sequences are free, an explicit allow-list of
//! wide blocks counts 2, combining marks count 0. Clipping and wrapping
//! operate on a token stream of (escape | character) pieces so neither a
//! codepoint nor an escape sequence can ever be split.

mod clip;
mod dynamic;
mod width;
mod wrap;

pub use clip::{clip, fit, pad_center, pad_left, pad_right};
pub use dynamic::{
    substitute_colors, substitute_commands, substitute_dynamic, DynamicTextProvider, NullProvider,
};
pub use width::{char_width, display_width, tokens, Token};
pub use wrap::{wrap, wrap_by_delimiter};

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::config::Justify;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn clip_never_exceeds_width(
            s in "\\PC{0,40}",
            w in 0usize..30,
        ) {
            for j in [Justify::Left, Justify::Right, Justify::Center] {
                let clipped = clip(&s, w, j);
                prop_assert!(
                    display_width(&clipped) <= w,
                    "clip({:?}, {}, {:?}) came out {} wide",
                    s, w, j, display_width(&clipped)
                );
            }
        }

        #[test]
        fn fit_is_exact_for_ascii(
            s in "[a-z ]{0,20}",
            w in 0usize..30,
        ) {
            // ASCII-only input: every char is width 1, so fit() lands
            // exactly on the target width for all justifications.
            for j in [Justify::Left, Justify::Right, Justify::Center] {
                prop_assert_eq!(display_width(&fit(&s, w, j)), w);
            }
        }

        #[test]
        fn wrapped_lines_reassemble_words(
            words in proptest::collection::vec("[a-z]{1,8}", 0..10),
            w in 1usize..20,
        ) {
            let text = words.join(" ");
            let lines = wrap(&text, w);
            let rejoined: Vec<&str> = lines
                .iter()
                .flat_map(|l| l.split_whitespace())
                .collect();
            prop_assert_eq!(rejoined, words.iter().map(String::as_str).collect::<Vec<_>>());
        }
    }
}
