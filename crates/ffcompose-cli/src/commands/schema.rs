use crate::cli::SchemaArgs;
use crate::error::{CliError, Result};
use ffcompose::core::potentials::PotentialKind;
use ffcompose::core::schema::{AttributeDescriptor, Converter, Schema};

pub fn run(args: SchemaArgs) -> Result<()> {
    let kinds = match args.tag {
        Some(tag) => vec![PotentialKind::from_tag(&tag).ok_or_else(|| {
            CliError::Argument(format!(
                "unknown potential '{}' (expected one of: {})",
                tag,
                PotentialKind::ALL
                    .iter()
                    .map(|kind| kind.tag())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))
        })?],
        None => PotentialKind::ALL.to_vec(),
    };

    for kind in kinds {
        print!("{}", render(kind));
    }
    Ok(())
}

/// Describes one potential kind: capabilities, dependencies and both schemas.
pub fn render(kind: PotentialKind) -> String {
    let definition = kind.definition();
    let mut out = String::new();
    out.push_str(&format!("[{}]\n", kind.tag()));
    if !definition.capabilities.is_empty() {
        out.push_str(&format!(
            "capabilities: {}\n",
            definition.capabilities.join(", ")
        ));
    }
    if !definition.dependencies.is_empty() {
        out.push_str(&format!(
            "depends on: {}\n",
            definition.dependencies.join(", ")
        ));
    }
    render_schema(&mut out, "globals", &definition.global_schema);
    render_schema(&mut out, "records", &definition.record_schema);
    out.push('\n');
    out
}

fn render_schema(out: &mut String, heading: &str, schema: &Schema) {
    out.push_str(&format!("  {} ({}):\n", heading, schema.label()));
    for descriptor in schema.descriptors() {
        out.push_str(&format!("    {}\n", describe(descriptor)));
    }
}

fn describe(descriptor: &AttributeDescriptor) -> String {
    let mut line = format!("{:<24}", descriptor.name());
    let kind = match descriptor.converter_kind() {
        Converter::Identity => "any".to_string(),
        Converter::Float => "float".to_string(),
        Converter::Integer => "integer".to_string(),
        Converter::Quantity => match descriptor.unit_of_measure() {
            Some(unit) => format!("quantity [{}]", unit.dimension()),
            None => "quantity".to_string(),
        },
        Converter::Enumeration(choices) => format!("one of {}", choices.names().join("|")),
    };
    line.push_str(&kind);
    match descriptor.raw_default() {
        Some(default) => line.push_str(&format!(" = {}", default)),
        None if descriptor.is_required() => line.push_str(" (required)"),
        None => {}
    }
    line
}
