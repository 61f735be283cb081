//! Decide which files in the key layout directory are customer layouts, and
//! find the identity (the ir address code) of the remote they belong to.
//!
//! A customer layout is named `customer_ir_xxxx.kl`, where `xxxx` is the
//! identity in hex, e.g. `customer_ir_9f00.kl`. Depending on the product model,
//! other names are allowed too.

use log::trace;

pub const FILENAME_PREFIX: &str = "customer_ir_";
pub const FILENAME_EXTENSION: &str = ".kl";

const IDENTITY_LEN: usize = 4;

/// Products which use the plain `customer_ir_xxxx.kl` naming
const SHORT_FORM_MODELS: [&str; 3] = ["CanC", "AMOI_B", "EARISE_K"];

/// Layouts loaded for products whose model does not appear in any file name
const FALLBACK_IDENTITIES: [&str; 2] = ["4cb3", "fe01"];

/// A file naming convention. The first rule which applies to a product model
/// decides whether a file name is accepted.
struct Rule {
    name: &'static str,
    /// Does this rule apply, given the file name after the prefix and the model
    applies: fn(&str, &str) -> bool,
    /// Is the file name after the prefix acceptable
    accepts: fn(&str) -> bool,
}

static RULES: [Rule; 4] = [
    Rule {
        name: "no product model",
        applies: no_model,
        accepts: identity_then_extension,
    },
    Rule {
        name: "short form product model",
        applies: short_form_model,
        accepts: identity_then_extension,
    },
    Rule {
        name: "product model in file name",
        applies: model_in_file_name,
        accepts: extension_at_end,
    },
    Rule {
        name: "fallback layout",
        applies: always,
        accepts: fallback_identity,
    },
];

fn no_model(_: &str, model: &str) -> bool {
    model.is_empty()
}

fn short_form_model(_: &str, model: &str) -> bool {
    SHORT_FORM_MODELS
        .iter()
        .any(|short| model.starts_with(short))
}

/// The model follows the identity, either directly or after one separator
/// character, e.g. `customer_ir_9f00foo.kl` or `customer_ir_9f00_foo.kl`
// Legacy layouts only ever used the separator form (model at offset 5); offset
// 4 is accepted as well for names without a separator.
fn model_in_file_name(rest: &str, model: &str) -> bool {
    [IDENTITY_LEN, IDENTITY_LEN + 1]
        .iter()
        .any(|offset| rest.get(*offset..).is_some_and(|s| s.starts_with(model)))
}

fn always(_: &str, _: &str) -> bool {
    true
}

fn identity_then_extension(rest: &str) -> bool {
    rest.get(IDENTITY_LEN..)
        .is_some_and(|s| s.starts_with(FILENAME_EXTENSION))
}

// Only the end of the name is checked here, unlike the other rules
fn extension_at_end(rest: &str) -> bool {
    rest.ends_with(FILENAME_EXTENSION)
}

fn fallback_identity(rest: &str) -> bool {
    FALLBACK_IDENTITIES.iter().any(|id| rest.starts_with(id)) && identity_then_extension(rest)
}

/// Check the file name against the naming rules for the product model (empty
/// if unknown), and return the identity if it is a customer layout.
pub fn verify(filename: &str, model: &str) -> Option<u16> {
    let rest = filename.strip_prefix(FILENAME_PREFIX)?;

    let rule = RULES.iter().find(|rule| (rule.applies)(rest, model))?;

    if !(rule.accepts)(rest) {
        trace!("{filename}: does not match naming rule for {}", rule.name);
        return None;
    }

    let identity = rest.get(..IDENTITY_LEN)?;

    if !identity.bytes().all(|b| b.is_ascii_hexdigit()) {
        trace!("{filename}: identity ‘{identity}’ is not hexadecimal");
        return None;
    }

    u16::from_str_radix(identity, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(filename: &str, model: &str) -> &'static str {
        let rest = filename.strip_prefix(FILENAME_PREFIX).unwrap();

        RULES
            .iter()
            .find(|rule| (rule.applies)(rest, model))
            .unwrap()
            .name
    }

    #[test]
    fn no_product_model() {
        assert_eq!(verify("customer_ir_9f00.kl", ""), Some(0x9f00));
        assert_eq!(verify("customer_ir_FE01.kl", ""), Some(0xfe01));
        assert_eq!(verify("customer_ir_0000.kl", ""), Some(0));
        assert_eq!(verify("customer_ir_xxxx.kl", ""), None);
        assert_eq!(verify("customer_ir_9f0g.kl", ""), None);
        assert_eq!(verify("other_9f00.kl", ""), None);
        assert_eq!(verify("customer_ir_9f00.kl.bak", ""), Some(0x9f00));
        assert_eq!(verify("customer_ir_9f00.idc", ""), None);
        assert_eq!(verify("customer_ir_9f001.kl", ""), None);
        assert_eq!(verify("customer_ir_9f0.kl", ""), None);
        assert_eq!(verify("customer_ir_", ""), None);
        assert_eq!(verify("sunxi-ir.kl", ""), None);
        assert_eq!(verify("customer_ir_9f€.kl", ""), None);

        assert_eq!(rule("customer_ir_9f00.kl", ""), "no product model");
    }

    #[test]
    fn short_form_models() {
        for model in ["CanC", "CanC_X5", "AMOI_B", "AMOI_B2", "EARISE_K", "EARISE_K9"] {
            assert_eq!(rule("customer_ir_9f00.kl", model), "short form product model");
            assert_eq!(verify("customer_ir_9f00.kl", model), Some(0x9f00));
            assert_eq!(verify("customer_ir_xxxx.kl", model), None);
            assert_eq!(verify("other_9f00.kl", model), None);
            assert_eq!(verify(&format!("customer_ir_9f00{model}.kl"), model), None);
        }

        // prefixes must match in full
        assert_eq!(rule("customer_ir_9f00.kl", "Can"), "fallback layout");
        assert_eq!(rule("customer_ir_9f00.kl", "AMOI_"), "fallback layout");
        assert_eq!(rule("customer_ir_9f00.kl", "EARISE"), "fallback layout");
    }

    #[test]
    fn model_in_name() {
        assert_eq!(rule("customer_ir_9f00foobar.kl", "foobar"), "product model in file name");
        assert_eq!(verify("customer_ir_9f00foobar.kl", "foobar"), Some(0x9f00));
        assert_eq!(verify("customer_ir_9f00_foobar.kl", "foobar"), Some(0x9f00));
        assert_eq!(verify("customer_ir_9f00-foobar_v2.kl", "foobar"), Some(0x9f00));
        assert_eq!(verify("customer_ir_9f00_foobar.txt", "foobar"), None);
        assert_eq!(verify("customer_ir_zz00_foobar.kl", "foobar"), None);

        // too far from the identity
        assert_eq!(rule("customer_ir_9f00__foobar.kl", "foobar"), "fallback layout");
        assert_eq!(verify("customer_ir_9f00__foobar.kl", "foobar"), None);
    }

    #[test]
    fn fallback() {
        assert_eq!(rule("customer_ir_9f00.kl", "foobar"), "fallback layout");
        assert_eq!(verify("customer_ir_9f00.kl", "foobar"), None);
        assert_eq!(verify("customer_ir_4cb3.kl", "foobar"), Some(0x4cb3));
        assert_eq!(verify("customer_ir_fe01.kl", "foobar"), Some(0xfe01));
        assert_eq!(verify("customer_ir_FE01.kl", "foobar"), None);
        assert_eq!(verify("customer_ir_4cb3_other.kl", "foobar"), None);
        assert_eq!(verify("customer_ir_9f00_other.kl", "foobar"), None);
    }
}
