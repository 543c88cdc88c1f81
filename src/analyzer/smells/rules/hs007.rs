//! HS007: has_helper_file
//!
//! A chart should ship a `_helpers.tpl` defining a `<chart>.labels` helper.
//! Unlike other checks, absence is the smell.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::analyzer::smells::rules::{ChartContext, Rule, SimpleRule};
use crate::analyzer::smells::surface::{TEMPLATES_DIR, find_file_named};
use crate::analyzer::smells::types::{Finding, RuleCategory};

const CODE: &str = "HS007";
const NAME: &str = "has_helper_file";
const DESCRIPTION: &str = "Charts must provide _helpers.tpl with a *.labels definition.";

pub const HELPERS_FILE: &str = "_helpers.tpl";

static LABELS_DEFINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"define\s+"[^"]+\.labels""#).unwrap());

pub fn rule() -> impl Rule {
    SimpleRule::new(CODE, NAME, RuleCategory::Template, DESCRIPTION, check)
}

/// The chart's own `templates/_helpers.tpl`, else the first one found
/// anywhere under the root.
fn helpers_file(root: &Path) -> Option<PathBuf> {
    let own = root.join(TEMPLATES_DIR).join(HELPERS_FILE);
    if own.is_file() {
        return Some(own);
    }
    find_file_named(root, HELPERS_FILE)
}

fn check(ctx: &ChartContext) -> Finding {
    let Some(path) = helpers_file(ctx.root) else {
        return Finding::with_count(NAME, 1, "_helpers.tpl not found.");
    };

    match fs::read_to_string(&path) {
        Ok(content) if LABELS_DEFINE.is_match(&content) => {
            Finding::clean(NAME, "_helpers.tpl found with a define \"*.labels\".")
        }
        Ok(_) => Finding::with_count(
            NAME,
            1,
            "_helpers.tpl found but it has no define \"*.labels\".",
        ),
        Err(e) => Finding::error(
            NAME,
            format!("Failed to read {}: {}", ctx.display_path(&path).display(), e),
        ),
    }
}
