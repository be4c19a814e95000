//! Splitting of tag strings into maximal digit and non-digit runs

/// A maximal run of either ASCII digits or non-digit characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run<'s> {
    pub text: &'s str,
    pub digits: bool,
}

/// Iterator over the runs of a string, in order.
///
/// Only ASCII `0-9` count as digits. ASCII digits are single bytes and never
/// appear inside a multi-byte UTF-8 sequence, so every boundary found here is
/// a valid `char` boundary.
#[derive(Debug, Clone)]
pub struct Runs<'s> {
    rest: &'s str,
}

impl<'s> Runs<'s> {
    pub fn new(text: &'s str) -> Self {
        Self { rest: text }
    }
}

impl<'s> Iterator for Runs<'s> {
    type Item = Run<'s>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = *self.rest.as_bytes().first()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .bytes()
            .position(|b| b.is_ascii_digit() != digits)
            .unwrap_or(self.rest.len());

        let (text, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(Run { text, digits })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(text: &str) -> Vec<(&str, bool)> {
        Runs::new(text).map(|run| (run.text, run.digits)).collect()
    }

    #[test]
    fn empty_string_has_no_runs() {
        assert_eq!(collect(""), vec![]);
    }

    #[test]
    fn alternates_between_digits_and_text() {
        assert_eq!(
            collect("v15.010-rc.1"),
            vec![
                ("v", false),
                ("15", true),
                (".", false),
                ("010", true),
                ("-rc.", false),
                ("1", true),
            ]
        );
    }

    #[test]
    fn non_ascii_characters_stay_in_literal_runs() {
        assert_eq!(
            collect("ü1²3"),
            vec![("ü", false), ("1", true), ("²", false), ("3", true)]
        );
    }
}
