//! Schema listing for registered profile types

use colored::Colorize;
use serde_json::Value;

use profile_meta::ProfileSpec;

use crate::context::CliContext;
use crate::error::Result;

/// Show the field schema of one type, or of every registered type.
pub fn run_schema(
    ctx: &CliContext,
    type_name: Option<&str>,
    json_output: bool,
) -> Result<()> {
    let specs: Vec<&ProfileSpec> = match type_name {
        Some(name) => vec![ctx.spec(name)?],
        None => ctx
            .registry
            .all()
            .into_iter()
            .filter_map(|name| ctx.registry.get(name))
            .collect(),
    };

    if json_output {
        let mut out = serde_json::Map::new();
        for spec in &specs {
            out.insert(
                spec.type_name().to_string(),
                serde_json::to_value(spec.fields()).unwrap_or_default(),
            );
        }
        println!(
            "{}",
            serde_json::to_string_pretty(&Value::Object(out)).unwrap_or_default()
        );
        return Ok(());
    }

    for (i, spec) in specs.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_spec(spec);
    }
    Ok(())
}

fn print_spec(spec: &ProfileSpec) {
    println!("{}", spec.type_name().bold());
    for field in spec.fields() {
        let requirement = if field.is_required() {
            "required".green().to_string()
        } else {
            "optional".dimmed().to_string()
        };
        println!(
            "  {:<14} {:<8} {:<10} {}",
            field.name(),
            field.kind().as_str(),
            requirement,
            field.description().dimmed()
        );
    }
}
