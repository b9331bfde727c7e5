use crate::error::Error;
use rand::{seq::SliceRandom, thread_rng, Rng};

pub const CHARSET_LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const CHARSET_UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const CHARSET_LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const CHARSET_ALPHANUMERIC: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Both bounds are inclusive.
pub fn int_in_range(from: i64, to: i64) -> Result<i64, Error> {
    check_range("range", from, to)?;

    Ok(thread_rng().gen_range(from..=to))
}

/// Uniform in `[from, to]`, rounded to two decimal places.
pub fn float_in_range(from: i64, to: i64) -> Result<f64, Error> {
    check_range("range", from, to)?;
    let value = thread_rng().gen_range(from as f64..=to as f64);

    Ok((value * 100.0).round() / 100.0)
}

pub fn string_from_charset(length: usize, charset: &str) -> Result<String, Error> {
    let chars: Vec<char> = charset.chars().collect();
    if chars.is_empty() {
        return Err(Error::InvalidArgument("charset must not be empty".into()));
    }

    let mut rng = thread_rng();
    Ok((0..length)
        .filter_map(|_| chars.choose(&mut rng))
        .collect())
}

/// Between `from` and `to` words separated by single spaces, each word
/// between `word_min` and `word_max` characters long.
pub fn sentence(
    charset: &str,
    word_min: usize,
    word_max: usize,
    from: usize,
    to: usize,
) -> Result<String, Error> {
    check_range("word count", from, to)?;
    check_range("word length", word_min, word_max)?;

    let mut rng = thread_rng();
    let words = rng.gen_range(from..=to);

    (0..words)
        .map(|_| string_from_charset(rng.gen_range(word_min..=word_max), charset))
        .collect::<Result<Vec<_>, _>>()
        .map(|words| words.join(" "))
}

fn check_range<T: PartialOrd + std::fmt::Display>(name: &str, from: T, to: T) -> Result<(), Error> {
    if from > to {
        return Err(Error::InvalidArgument(format!(
            "invalid {}: from {} should not be greater than to {}",
            name, from, to
        )));
    }

    Ok(())
}
