//! Command-line token parser.
//!
//! Tokens are consumed left to right:
//!
//! - `--name=value` applies `value` to the option named `name`, whatever its
//!   type. `--name` sets a boolean option to `true`; any other option takes
//!   the next token as its value.
//! - `-abc` is a cluster of short flags. Boolean flags are set to `true` and
//!   the rest of the token is read as another cluster. The first non-boolean
//!   flag takes the rest of the token as its value (`-ofile`), or the next
//!   token if nothing is left (`-o file`).
//! - A bare `--` ends option parsing; everything after it is positional.
//!   This is an extension: without it `--` would be a long flag with an
//!   empty name and fail as unknown.
//! - Anything else, including a bare `-` on its own, is a positional argument.
//!
//! A value taken from the next token must not start with `-`: `--out --verbose`
//! is a missing value, not an output file named `--verbose`, and so are
//! `--out -` and `--port -1`. Attach such values inline (`--out=-`, `-o-`).
//!
//! Values are applied as they are parsed. A failing token leaves earlier
//! assignments in place.

use tracing::trace;

use crate::error::UconfError;
use crate::opt::Opt;
use crate::registry::OptionSet;
use crate::value::Value;

impl OptionSet {
    /// Parse an argument vector (without the program name), applying flag
    /// values to their options and collecting positional arguments into
    /// [`args`](OptionSet::args).
    ///
    /// `args` is cleared first and only filled when parsing succeeds.
    /// A bare `--` ends option parsing, an addition to the plain long-flag
    /// grammar under which it would be an unknown flag with an empty name.
    /// Must not be called concurrently on the same set.
    pub fn parse_flags<I, S>(&mut self, args: I) -> Result<(), UconfError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.clear();
        let tokens: Vec<String> = args.into_iter().map(Into::into).collect();
        let positionals = Parser::new(self, &tokens).run()?;
        self.args = positionals;
        Ok(())
    }
}

struct Parser<'a> {
    set: &'a OptionSet,
    tokens: &'a [String],
    pos: usize,
    positionals: Vec<String>,
}

impl<'a> Parser<'a> {
    fn new(set: &'a OptionSet, tokens: &'a [String]) -> Self {
        Self {
            set,
            tokens,
            pos: 0,
            positionals: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<String>, UconfError> {
        while let Some(token) = self.next_token() {
            if token == "--" {
                trace!("end of options");
                let tokens = self.tokens;
                self.positionals.extend_from_slice(&tokens[self.pos..]);
                break;
            }

            if let Some(body) = token.strip_prefix("--") {
                self.long_flag(body)?;
            } else if let Some(cluster) = token.strip_prefix('-').filter(|c| !c.is_empty()) {
                self.short_cluster(cluster)?;
            } else {
                trace!(token, "positional");
                self.positionals.push(token.to_string());
            }
        }
        Ok(self.positionals)
    }

    fn next_token(&mut self) -> Option<&'a str> {
        let tokens = self.tokens;
        let token = tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    /// Consume the next token as the value for `flag`.
    fn take_value(&mut self, flag: &str) -> Result<&'a str, UconfError> {
        let tokens = self.tokens;
        match tokens.get(self.pos) {
            Some(next) if !looks_like_flag(next) => {
                self.pos += 1;
                Ok(next)
            }
            _ => Err(UconfError::MissingValue(flag.to_string())),
        }
    }

    fn long_flag(&mut self, body: &'a str) -> Result<(), UconfError> {
        let (name, inline) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };
        let set = self.set;
        let opt = set
            .find_long_flag(name)
            .ok_or_else(|| UconfError::UnknownFlag(format!("--{name}")))?;

        match inline {
            Some(value) => apply(opt, value),
            None if opt.is_bool() => enable(opt),
            None => {
                let value = self.take_value(&format!("--{name}"))?;
                apply(opt, value)
            }
        }
    }

    fn short_cluster(&mut self, cluster: &'a str) -> Result<(), UconfError> {
        let set = self.set;
        let mut rest = cluster;

        while let Some(short) = rest.chars().next() {
            let tail = &rest[short.len_utf8()..];
            let opt = set
                .find_short_flag(short)
                .ok_or_else(|| UconfError::UnknownFlag(format!("-{short}")))?;

            if opt.is_bool() {
                enable(opt)?;
                rest = tail;
                continue;
            }

            let value = if tail.is_empty() {
                self.take_value(&format!("-{short}"))?
            } else {
                tail
            };
            return apply(opt, value);
        }
        Ok(())
    }
}

fn looks_like_flag(token: &str) -> bool {
    token.starts_with('-')
}

fn apply(opt: &dyn Opt, raw: &str) -> Result<(), UconfError> {
    trace!(option = opt.flag(), value = raw, "flag value");
    opt.set(Value::String(raw.to_string()))
}

fn enable(opt: &dyn Opt) -> Result<(), UconfError> {
    trace!(option = opt.flag(), "boolean flag");
    opt.set(Value::Bool(true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::sample_set;

    #[test]
    fn long_flag_with_inline_value() {
        let mut o = OptionSet::new("test");
        for (flag, val) in [("foo", "fooval"), ("bar", "barval")] {
            let slot = o.string(flag, None, "", "").unwrap();
            o.parse_flags([format!("--{flag}={val}")]).unwrap();
            assert_eq!(slot.get(), val);
            assert!(o.args().is_empty());
        }
    }

    #[test]
    fn long_flag_with_separate_value() {
        let mut o = OptionSet::new("test");
        let slot = o.string("foo", None, "", "").unwrap();
        o.parse_flags(["--foo", "fooval"]).unwrap();
        assert_eq!(slot.get(), "fooval");
        assert!(o.args().is_empty());
    }

    #[test]
    fn inline_and_separate_values_agree() {
        let mut inline = OptionSet::new("test");
        let a = inline.string("path", None, "", "").unwrap();
        inline.parse_flags(["--path=/tmp/x"]).unwrap();

        let mut separate = OptionSet::new("test");
        let b = separate.string("path", None, "", "").unwrap();
        separate.parse_flags(["--path", "/tmp/x"]).unwrap();

        assert_eq!(a.get(), b.get());
        assert_eq!(inline.args(), separate.args());
    }

    #[test]
    fn inline_value_splits_at_first_equals() {
        let mut o = OptionSet::new("test");
        let slot = o.string("define", None, "", "").unwrap();
        o.parse_flags(["--define=key=value"]).unwrap();
        assert_eq!(slot.get(), "key=value");
    }

    #[test]
    fn repeated_string_long_flag_is_missing_value() {
        let mut o = OptionSet::new("test");
        o.string("foo", None, "", "").unwrap();
        let err = o.parse_flags(["--foo", "--foo"]).unwrap_err();
        assert!(matches!(err, UconfError::MissingValue(ref f) if f == "--foo"));
        assert!(o.args().is_empty());
    }

    #[test]
    fn trailing_value_flag_is_missing_value() {
        let mut o = OptionSet::new("test");
        o.string("foo", 'f', "", "").unwrap();
        assert!(matches!(
            o.parse_flags(["--foo"]),
            Err(UconfError::MissingValue(_))
        ));
        assert!(matches!(
            o.parse_flags(["-f"]),
            Err(UconfError::MissingValue(_))
        ));
    }

    #[test]
    fn short_flag_with_separate_and_attached_value() {
        let mut o = OptionSet::new("test");
        let slot = o.string("a", 'a', "", "").unwrap();

        o.parse_flags(["-a", "aval"]).unwrap();
        assert_eq!(slot.get(), "aval");

        slot.set("reset".into());
        o.parse_flags(["-aaval"]).unwrap();
        assert_eq!(slot.get(), "aval");
        assert!(o.args().is_empty());
    }

    #[test]
    fn repeated_string_short_flag_is_missing_value() {
        let mut o = OptionSet::new("test");
        o.string("b", 'b', "", "").unwrap();
        let err = o.parse_flags(["-b", "-b"]).unwrap_err();
        assert!(matches!(err, UconfError::MissingValue(ref f) if f == "-b"));
    }

    #[test]
    fn bare_dash_is_not_a_separate_value() {
        let mut o = OptionSet::new("test");
        let slot = o.string("input", 'i', "", "").unwrap();

        let err = o.parse_flags(["--input", "-"]).unwrap_err();
        assert!(matches!(err, UconfError::MissingValue(ref f) if f == "--input"));
        let err = o.parse_flags(["-i", "-"]).unwrap_err();
        assert!(matches!(err, UconfError::MissingValue(ref f) if f == "-i"));
        assert_eq!(slot.get(), "");

        o.parse_flags(["--input=-"]).unwrap();
        assert_eq!(slot.get(), "-");
        slot.set("reset".into());
        o.parse_flags(["-i-"]).unwrap();
        assert_eq!(slot.get(), "-");
    }

    #[test]
    fn bool_long_flags() {
        let mut o = OptionSet::new("test");
        let a = o.bool("aa", None, false, "").unwrap();
        let b = o.bool("bb", None, false, "").unwrap();

        o.parse_flags(["--aa"]).unwrap();
        assert!(a.get());
        o.parse_flags(["--bb"]).unwrap();
        assert!(b.get());

        a.set(false);
        b.set(false);
        o.parse_flags(["--aa", "--bb"]).unwrap();
        assert!(a.get() && b.get());

        a.set(false);
        b.set(false);
        o.parse_flags(["--aa", "arbitrary", "--bb", "other"]).unwrap();
        assert!(a.get() && b.get());
        assert_eq!(o.args(), ["arbitrary", "other"]);
    }

    #[test]
    fn bool_long_flag_with_explicit_value() {
        let mut o = OptionSet::new("test");
        let a = o.bool("aa", None, true, "").unwrap();
        o.parse_flags(["--aa=false"]).unwrap();
        assert!(!a.get());
    }

    #[test]
    fn bool_long_flag_rejects_non_boolean_value() {
        let mut o = OptionSet::new("test");
        o.bool("aa", None, false, "").unwrap();
        let err = o.parse_flags(["--aa=maybe"]).unwrap_err();
        assert!(matches!(err, UconfError::Conversion { ref key, .. } if key == "aa"));
    }

    #[test]
    fn bool_short_flags() {
        let mut o = OptionSet::new("test");
        let a = o.bool("aa", 'a', false, "").unwrap();
        let b = o.bool("bb", 'b', false, "").unwrap();

        o.parse_flags(["-a"]).unwrap();
        assert!(a.get());
        o.parse_flags(["-b"]).unwrap();
        assert!(b.get());

        for args in [
            vec!["-ab"],
            vec!["-a", "-b"],
            vec!["-a", "arbitrary", "-b", "arbitrary"],
        ] {
            a.set(false);
            b.set(false);
            o.parse_flags(args.clone()).unwrap();
            assert!(a.get() && b.get(), "{args:?}");
        }
    }

    #[test]
    fn bool_cluster_with_unknown_rest_fails() {
        let mut o = OptionSet::new("test");
        let a = o.bool("aa", 'a', false, "").unwrap();
        o.bool("bb", 'b', false, "").unwrap();

        let err = o.parse_flags(["-aarbitrary"]).unwrap_err();
        assert!(matches!(err, UconfError::UnknownFlag(ref f) if f == "-r"));
        // no rollback of flags applied before the failure
        assert!(a.get());
    }

    #[test]
    fn cluster_ends_with_value_flag() {
        let mut o = OptionSet::new("test");
        let verbose = o.bool("verbose", 'v', false, "").unwrap();
        let output = o.string("output", 'o', "", "").unwrap();

        o.parse_flags(["-vofile.txt"]).unwrap();
        assert!(verbose.get());
        assert_eq!(output.get(), "file.txt");

        verbose.set(false);
        o.parse_flags(["-vo", "other.txt"]).unwrap();
        assert!(verbose.get());
        assert_eq!(output.get(), "other.txt");
    }

    #[test]
    fn unknown_long_flag() {
        let mut o = OptionSet::new("test");
        let err = o.parse_flags(["--nope=1"]).unwrap_err();
        assert!(matches!(err, UconfError::UnknownFlag(ref f) if f == "--nope"));
    }

    #[test]
    fn unknown_short_flag() {
        let mut o = OptionSet::new("test");
        o.string("aflag", None, "", "").unwrap();
        let err = o.parse_flags(["-x"]).unwrap_err();
        assert!(matches!(err, UconfError::UnknownFlag(ref f) if f == "-x"));
    }

    #[test]
    fn double_dash_ends_options() {
        let mut o = OptionSet::new("test");
        let verbose = o.bool("verbose", 'v', false, "").unwrap();
        o.parse_flags(["first", "--", "-v", "--verbose"]).unwrap();
        assert!(!verbose.get());
        assert_eq!(o.args(), ["first", "-v", "--verbose"]);
    }

    #[test]
    fn bare_dash_is_positional() {
        let mut o = OptionSet::new("test");
        o.parse_flags(["-"]).unwrap();
        assert_eq!(o.args(), ["-"]);
    }

    #[test]
    fn empty_input_changes_nothing() {
        let (mut o, slots) = sample_set();
        o.parse_flags(Vec::<String>::new()).unwrap();
        assert_eq!(slots.foo.get(), "");
        assert!(!slots.verbose.get());
        assert_eq!(slots.port.get(), 8080);
        assert!(o.args().is_empty());
    }

    #[test]
    fn end_to_end_mixed_flags() {
        let (mut o, slots) = sample_set();
        o.parse_flags(["--foo=bar", "-v", "extra"]).unwrap();
        assert_eq!(slots.foo.get(), "bar");
        assert!(slots.verbose.get());
        assert_eq!(o.args(), ["extra"]);
    }

    #[test]
    fn end_to_end_bool_cluster() {
        let mut o = OptionSet::new("test");
        let a = o.bool("a", 'a', false, "").unwrap();
        let b = o.bool("b", 'b', false, "").unwrap();
        o.parse_flags(["-ab"]).unwrap();
        assert!(a.get());
        assert!(b.get());
        assert!(o.args().is_empty());
    }

    #[test]
    fn typed_values_are_converted() {
        let (mut o, slots) = sample_set();
        o.parse_flags(["-p", "9090", "--timeout", "1m", "--tags=a,b"])
            .unwrap();
        assert_eq!(slots.port.get(), 9090);
        assert_eq!(slots.timeout.get(), std::time::Duration::from_secs(60));
        assert_eq!(slots.tags.get(), vec!["a", "b"]);
    }

    #[test]
    fn negative_number_is_flag_shaped() {
        let (mut o, _) = sample_set();
        let err = o.parse_flags(["--port", "-1"]).unwrap_err();
        assert!(matches!(err, UconfError::MissingValue(_)));
        o.parse_flags(["--port=-1"]).unwrap();
    }

    #[test]
    fn reparse_resets_args() {
        let (mut o, _) = sample_set();
        o.parse_flags(["one", "two"]).unwrap();
        assert_eq!(o.args(), ["one", "two"]);
        o.parse_flags(["three"]).unwrap();
        assert_eq!(o.args(), ["three"]);
    }

    #[test]
    fn failed_parse_leaves_args_empty() {
        let (mut o, _) = sample_set();
        o.parse_flags(["one"]).unwrap();
        assert!(o.parse_flags(["two", "--unknown"]).is_err());
        assert!(o.args().is_empty());
    }

    #[test]
    fn multibyte_short_flags() {
        let mut o = OptionSet::new("test");
        let lambda = o.bool("lambda", 'λ', false, "").unwrap();
        let mu = o.string("mu", 'μ', "", "").unwrap();
        o.parse_flags(["-λμvalé"]).unwrap();
        assert!(lambda.get());
        assert_eq!(mu.get(), "valé");
    }
}
