use crate::analyzer::smells::rules::all_rules;
use colored::Colorize;

/// Table of every available check.
pub fn format_rules() -> String {
    let rules = all_rules();
    let name_width = rules.iter().map(|r| r.name().len()).max().unwrap_or(0);

    let mut output = format!(
        "{}\n",
        format!(
            "{:<6}  {:<name_width$}  {:<12}  {:<8}  {}",
            "Code",
            "Name",
            "Category",
            "Default",
            "Description",
            name_width = name_width
        )
        .bold()
    );
    for rule in &rules {
        let default = if rule.is_extended() { "no" } else { "yes" };
        output.push_str(&format!(
            "{:<6}  {:<name_width$}  {:<12}  {:<8}  {}\n",
            rule.code().as_str(),
            rule.name(),
            rule.category().display_name(),
            default,
            rule.description(),
            name_width = name_width
        ));
    }
    output
}

pub fn handle_rules() -> crate::Result<()> {
    print!("{}", format_rules());
    Ok(())
}
