//! Byte-level pattern matching over stylesheet source.
//!
//! A matcher is a pure function from a byte position to the end of a match,
//! `Fn(&[u8], usize) -> Option<usize>`. Small matchers compose into grammar
//! level token classes (identifiers, numbers, strings, directive keywords)
//! with the [`sequence!`] and [`alternatives!`] macros. The parser consumes
//! these through its `peek`/`lex` methods; nothing in this module advances the
//! cursor or touches parser state.

/// A half-open byte range `[begin, end)` into a source buffer.
///
/// Tokens carry no ownership; resolving one to text requires the file it was
/// lexed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    begin: u32,
    end: u32,
}

impl Token {
    pub(crate) const EMPTY: Token = Token { begin: 0, end: 0 };

    pub(crate) fn new(begin: usize, end: usize) -> Self {
        Token {
            begin: begin as u32,
            end: end as u32,
        }
    }

    pub fn begin(self) -> usize {
        self.begin as usize
    }

    pub fn end(self) -> usize {
        self.end as usize
    }

    pub fn is_empty(self) -> bool {
        self.begin == self.end
    }

    /// The range with the first and last byte removed, e.g. the contents of a
    /// quoted string.
    pub(crate) fn unquoted(self) -> Token {
        Token {
            begin: self.begin + 1,
            end: self.end.saturating_sub(1).max(self.begin + 1),
        }
    }
}

/// Matches each matcher in order, contiguously. Succeeds only if all do.
macro_rules! sequence {
    ($($matcher:expr),+ $(,)?) => {
        move |src: &[u8], pos: usize| -> Option<usize> {
            let mut pos = pos;
            $(pos = $matcher(src, pos)?;)+
            Some(pos)
        }
    };
}

/// Tries each matcher in order at the same position, returning the first hit.
macro_rules! alternatives {
    ($($matcher:expr),+ $(,)?) => {
        move |src: &[u8], pos: usize| -> Option<usize> {
            $(if let Some(end) = $matcher(src, pos) {
                return Some(end);
            })+
            None
        }
    };
}

pub(crate) use alternatives;
pub(crate) use sequence;

pub(crate) fn exactly(c: u8) -> impl Fn(&[u8], usize) -> Option<usize> + Copy {
    move |src, pos| (src.get(pos) == Some(&c)).then(|| pos + 1)
}

pub(crate) fn literal(s: &'static str) -> impl Fn(&[u8], usize) -> Option<usize> + Copy {
    move |src, pos| {
        let bytes = s.as_bytes();
        src.get(pos..pos + bytes.len())
            .filter(|window| *window == bytes)
            .map(|_| pos + bytes.len())
    }
}

pub(crate) fn byte_if<F>(pred: F) -> impl Fn(&[u8], usize) -> Option<usize> + Copy
where
    F: Fn(u8) -> bool + Copy,
{
    move |src, pos| src.get(pos).copied().filter(|&b| pred(b)).map(|_| pos + 1)
}

/// Succeeds without consuming anything iff the inner matcher fails here.
pub(crate) fn negate<M>(matcher: M) -> impl Fn(&[u8], usize) -> Option<usize> + Copy
where
    M: Fn(&[u8], usize) -> Option<usize> + Copy,
{
    move |src, pos| match matcher(src, pos) {
        Some(..) => None,
        None => Some(pos),
    }
}

/// Always succeeds, consuming the inner match if present.
pub(crate) fn optional<M>(matcher: M) -> impl Fn(&[u8], usize) -> Option<usize> + Copy
where
    M: Fn(&[u8], usize) -> Option<usize> + Copy,
{
    move |src, pos| Some(matcher(src, pos).unwrap_or(pos))
}

pub(crate) fn zero_plus<M>(matcher: M) -> impl Fn(&[u8], usize) -> Option<usize> + Copy
where
    M: Fn(&[u8], usize) -> Option<usize> + Copy,
{
    move |src, mut pos| {
        while let Some(next) = matcher(src, pos) {
            if next == pos {
                break;
            }
            pos = next;
        }
        Some(pos)
    }
}

pub(crate) fn one_plus<M>(matcher: M) -> impl Fn(&[u8], usize) -> Option<usize> + Copy
where
    M: Fn(&[u8], usize) -> Option<usize> + Copy,
{
    move |src, pos| {
        let pos = matcher(src, pos)?;
        zero_plus(matcher)(src, pos)
    }
}

fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0c)
}

fn is_alpha(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

fn is_alnum(b: u8) -> bool {
    b.is_ascii_alphanumeric()
}

fn is_xdigit(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

fn any_byte(src: &[u8], pos: usize) -> Option<usize> {
    byte_if(|_| true)(src, pos)
}

// Whitespace and comments

pub(crate) fn spaces(src: &[u8], pos: usize) -> Option<usize> {
    one_plus(byte_if(is_space))(src, pos)
}

pub(crate) fn optional_spaces(src: &[u8], pos: usize) -> Option<usize> {
    zero_plus(byte_if(is_space))(src, pos)
}

/// A `//` comment, up to but not including the terminating newline.
pub(crate) fn line_comment(src: &[u8], pos: usize) -> Option<usize> {
    sequence!(literal("//"), zero_plus(byte_if(|b| b != b'\n')))(src, pos)
}

/// A `/* ... */` comment. Fails when unterminated.
pub(crate) fn block_comment(src: &[u8], pos: usize) -> Option<usize> {
    let mut p = literal("/*")(src, pos)?;
    while p < src.len() {
        if let Some(end) = literal("*/")(src, p) {
            return Some(end);
        }
        p += 1;
    }
    None
}

pub(crate) fn spaces_and_comments(src: &[u8], pos: usize) -> Option<usize> {
    zero_plus(alternatives!(spaces, line_comment, block_comment))(src, pos)
}

// Token classes

/// A CSS identifier: an optional leading `-`, a letter or `_`, then any run
/// of letters, digits, `-`, and `_`.
pub(crate) fn identifier(src: &[u8], pos: usize) -> Option<usize> {
    sequence!(
        optional(exactly(b'-')),
        alternatives!(byte_if(is_alpha), exactly(b'_')),
        zero_plus(alternatives!(
            byte_if(is_alnum),
            exactly(b'-'),
            exactly(b'_')
        ))
    )(src, pos)
}

/// A name as used after `#` in id selectors; unlike identifiers, names may
/// begin with a digit.
pub(crate) fn name(src: &[u8], pos: usize) -> Option<usize> {
    one_plus(alternatives!(
        byte_if(is_alnum),
        exactly(b'-'),
        exactly(b'_')
    ))(src, pos)
}

pub(crate) fn id_name(src: &[u8], pos: usize) -> Option<usize> {
    sequence!(exactly(b'#'), name)(src, pos)
}

pub(crate) fn class_name(src: &[u8], pos: usize) -> Option<usize> {
    sequence!(exactly(b'.'), identifier)(src, pos)
}

pub(crate) fn digits(src: &[u8], pos: usize) -> Option<usize> {
    one_plus(byte_if(is_digit))(src, pos)
}

pub(crate) fn sign(src: &[u8], pos: usize) -> Option<usize> {
    alternatives!(exactly(b'+'), exactly(b'-'))(src, pos)
}

/// An optionally signed numeral with an optional fractional part. There is no
/// bare `.5` form.
pub(crate) fn number(src: &[u8], pos: usize) -> Option<usize> {
    alternatives!(
        sequence!(optional(sign), digits, exactly(b'.'), digits),
        sequence!(optional(sign), digits)
    )(src, pos)
}

/// The coefficient of an `an+b` binomial; possibly empty, possibly just a sign.
pub(crate) fn coefficient(src: &[u8], pos: usize) -> Option<usize> {
    sequence!(optional(sign), optional(digits))(src, pos)
}

pub(crate) fn binomial(src: &[u8], pos: usize) -> Option<usize> {
    sequence!(
        optional(sign),
        optional(digits),
        exactly(b'n'),
        optional_spaces,
        sign,
        optional_spaces,
        digits
    )(src, pos)
}

pub(crate) fn percentage(src: &[u8], pos: usize) -> Option<usize> {
    sequence!(number, exactly(b'%'))(src, pos)
}

/// A numeral directly followed by its unit, with no intervening whitespace.
pub(crate) fn dimension(src: &[u8], pos: usize) -> Option<usize> {
    sequence!(number, identifier)(src, pos)
}

/// `#` followed by exactly six or exactly three hex digits.
pub(crate) fn hex(src: &[u8], pos: usize) -> Option<usize> {
    let x = byte_if(is_xdigit);
    alternatives!(
        sequence!(exactly(b'#'), x, x, x, x, x, x),
        sequence!(exactly(b'#'), x, x, x)
    )(src, pos)
}

/// A single- or double-quoted string. Escape sequences are carried through
/// literally; raw newlines terminate the match unsuccessfully.
pub(crate) fn string_constant(src: &[u8], pos: usize) -> Option<usize> {
    alternatives!(quoted(b'"'), quoted(b'\''))(src, pos)
}

fn quoted(quote: u8) -> impl Fn(&[u8], usize) -> Option<usize> + Copy {
    move |src, pos| {
        sequence!(
            exactly(quote),
            zero_plus(alternatives!(
                sequence!(exactly(b'\\'), any_byte),
                byte_if(move |b| b != quote && b != b'\n')
            )),
            exactly(quote)
        )(src, pos)
    }
}

pub(crate) fn variable(src: &[u8], pos: usize) -> Option<usize> {
    sequence!(exactly(b'$'), identifier)(src, pos)
}

/// `#{` through the very next `}`. Nested braces are not balanced; the first
/// `}` closes the interpolant.
pub(crate) fn interpolant(src: &[u8], pos: usize) -> Option<usize> {
    sequence!(
        literal("#{"),
        zero_plus(byte_if(|b| b != b'}')),
        exactly(b'}')
    )(src, pos)
}

pub(crate) fn uri_prefix(src: &[u8], pos: usize) -> Option<usize> {
    literal("url(")(src, pos)
}

pub(crate) fn important(src: &[u8], pos: usize) -> Option<usize> {
    sequence!(exactly(b'!'), optional_spaces, literal("important"))(src, pos)
}

pub(crate) fn default_flag(src: &[u8], pos: usize) -> Option<usize> {
    sequence!(exactly(b'!'), optional_spaces, literal("default"))(src, pos)
}

// Selectors

pub(crate) fn type_selector(src: &[u8], pos: usize) -> Option<usize> {
    identifier(src, pos)
}

pub(crate) fn universal(src: &[u8], pos: usize) -> Option<usize> {
    exactly(b'*')(src, pos)
}

/// `:` or `::`.
pub(crate) fn pseudo_prefix(src: &[u8], pos: usize) -> Option<usize> {
    sequence!(exactly(b':'), optional(exactly(b':')))(src, pos)
}

/// An identifier directly followed by `(`, as in function calls and
/// functional pseudo-classes.
pub(crate) fn functional(src: &[u8], pos: usize) -> Option<usize> {
    sequence!(identifier, exactly(b'('))(src, pos)
}

pub(crate) fn pseudo_not(src: &[u8], pos: usize) -> Option<usize> {
    sequence!(exactly(b':'), literal("not("))(src, pos)
}

pub(crate) fn even(src: &[u8], pos: usize) -> Option<usize> {
    literal("even")(src, pos)
}

pub(crate) fn odd(src: &[u8], pos: usize) -> Option<usize> {
    literal("odd")(src, pos)
}

pub(crate) fn exact_match(src: &[u8], pos: usize) -> Option<usize> {
    literal("=")(src, pos)
}

pub(crate) fn class_match(src: &[u8], pos: usize) -> Option<usize> {
    literal("~=")(src, pos)
}

pub(crate) fn dash_match(src: &[u8], pos: usize) -> Option<usize> {
    literal("|=")(src, pos)
}

pub(crate) fn prefix_match(src: &[u8], pos: usize) -> Option<usize> {
    literal("^=")(src, pos)
}

pub(crate) fn suffix_match(src: &[u8], pos: usize) -> Option<usize> {
    literal("$=")(src, pos)
}

pub(crate) fn substring_match(src: &[u8], pos: usize) -> Option<usize> {
    literal("*=")(src, pos)
}

pub(crate) fn attribute_operator(src: &[u8], pos: usize) -> Option<usize> {
    alternatives!(
        exact_match,
        class_match,
        dash_match,
        prefix_match,
        suffix_match,
        substring_match
    )(src, pos)
}

// Operators

pub(crate) fn eq_op(src: &[u8], pos: usize) -> Option<usize> {
    literal("==")(src, pos)
}

pub(crate) fn neq_op(src: &[u8], pos: usize) -> Option<usize> {
    literal("!=")(src, pos)
}

pub(crate) fn gte_op(src: &[u8], pos: usize) -> Option<usize> {
    literal(">=")(src, pos)
}

pub(crate) fn lte_op(src: &[u8], pos: usize) -> Option<usize> {
    literal("<=")(src, pos)
}

pub(crate) fn gt_op(src: &[u8], pos: usize) -> Option<usize> {
    literal(">")(src, pos)
}

pub(crate) fn lt_op(src: &[u8], pos: usize) -> Option<usize> {
    literal("<")(src, pos)
}

// Keywords

pub(crate) fn and_kwd(src: &[u8], pos: usize) -> Option<usize> {
    literal("and")(src, pos)
}

pub(crate) fn or_kwd(src: &[u8], pos: usize) -> Option<usize> {
    literal("or")(src, pos)
}

pub(crate) fn not_kwd(src: &[u8], pos: usize) -> Option<usize> {
    literal("not")(src, pos)
}

pub(crate) fn only_kwd(src: &[u8], pos: usize) -> Option<usize> {
    literal("only")(src, pos)
}

pub(crate) fn true_kwd(src: &[u8], pos: usize) -> Option<usize> {
    literal("true")(src, pos)
}

pub(crate) fn false_kwd(src: &[u8], pos: usize) -> Option<usize> {
    literal("false")(src, pos)
}

pub(crate) fn from_kwd(src: &[u8], pos: usize) -> Option<usize> {
    literal("from")(src, pos)
}

pub(crate) fn through_kwd(src: &[u8], pos: usize) -> Option<usize> {
    literal("through")(src, pos)
}

pub(crate) fn to_kwd(src: &[u8], pos: usize) -> Option<usize> {
    literal("to")(src, pos)
}

pub(crate) fn in_kwd(src: &[u8], pos: usize) -> Option<usize> {
    literal("in")(src, pos)
}

// Directives

pub(crate) fn import(src: &[u8], pos: usize) -> Option<usize> {
    literal("@import")(src, pos)
}

pub(crate) fn mixin(src: &[u8], pos: usize) -> Option<usize> {
    literal("@mixin")(src, pos)
}

pub(crate) fn function(src: &[u8], pos: usize) -> Option<usize> {
    literal("@function")(src, pos)
}

pub(crate) fn include(src: &[u8], pos: usize) -> Option<usize> {
    literal("@include")(src, pos)
}

pub(crate) fn if_directive(src: &[u8], pos: usize) -> Option<usize> {
    literal("@if")(src, pos)
}

pub(crate) fn elseif_directive(src: &[u8], pos: usize) -> Option<usize> {
    sequence!(literal("@else"), spaces_and_comments, literal("if"))(src, pos)
}

pub(crate) fn else_directive(src: &[u8], pos: usize) -> Option<usize> {
    literal("@else")(src, pos)
}

pub(crate) fn for_directive(src: &[u8], pos: usize) -> Option<usize> {
    literal("@for")(src, pos)
}

pub(crate) fn each_directive(src: &[u8], pos: usize) -> Option<usize> {
    literal("@each")(src, pos)
}

pub(crate) fn while_directive(src: &[u8], pos: usize) -> Option<usize> {
    literal("@while")(src, pos)
}

pub(crate) fn media(src: &[u8], pos: usize) -> Option<usize> {
    literal("@media")(src, pos)
}

pub(crate) fn warn(src: &[u8], pos: usize) -> Option<usize> {
    literal("@warn")(src, pos)
}

pub(crate) fn return_directive(src: &[u8], pos: usize) -> Option<usize> {
    literal("@return")(src, pos)
}

pub(crate) fn extend(src: &[u8], pos: usize) -> Option<usize> {
    literal("@extend")(src, pos)
}

/// Any `@`-directive name, known or not.
pub(crate) fn directive(src: &[u8], pos: usize) -> Option<usize> {
    sequence!(exactly(b'@'), identifier)(src, pos)
}

// Schemas

/// An identifier interleaved with at least one interpolant, following the
/// pattern `(x* i x*)+`.
pub(crate) fn identifier_schema(src: &[u8], pos: usize) -> Option<usize> {
    let fragment = zero_plus(alternatives!(identifier, exactly(b'-')));
    one_plus(sequence!(fragment, interpolant, fragment))(src, pos)
}

/// A value interleaved with at least one interpolant, following the pattern
/// `(x* i x*)+` where `x` ranges over the textual value tokens.
pub(crate) fn value_schema(src: &[u8], pos: usize) -> Option<usize> {
    let fragment = zero_plus(alternatives!(
        identifier,
        percentage,
        dimension,
        hex,
        number,
        string_constant,
        variable
    ));
    one_plus(sequence!(fragment, interpolant, fragment))(src, pos)
}

/// The head of a namespaced property: `identifier : {`.
pub(crate) fn propset_head(src: &[u8], pos: usize) -> Option<usize> {
    sequence!(
        identifier,
        optional_spaces,
        exactly(b':'),
        optional_spaces,
        exactly(b'{')
    )(src, pos)
}

// Scanning helpers

/// The first position at or after `pos` where `matcher` succeeds, scanning to
/// the end of the buffer.
pub(crate) fn find_first<M>(src: &[u8], pos: usize, matcher: M) -> Option<usize>
where
    M: Fn(&[u8], usize) -> Option<usize>,
{
    (pos..src.len()).find(|&i| matcher(src, i).is_some())
}

/// The first position in `[from, to)` where `matcher` succeeds. Only the start
/// of the match is constrained to the interval.
pub(crate) fn find_first_in_interval<M>(
    src: &[u8],
    from: usize,
    to: usize,
    matcher: M,
) -> Option<usize>
where
    M: Fn(&[u8], usize) -> Option<usize>,
{
    (from..to).find(|&i| matcher(src, i).is_some())
}

pub(crate) fn count_newlines(src: &[u8], from: usize, to: usize) -> usize {
    let from = from.min(src.len());
    let to = to.min(src.len());
    src[from..to].iter().filter(|&&b| b == b'\n').count()
}
