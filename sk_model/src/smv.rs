//! Prints a compiled model in the input language of NuSMV/nuXmv.

use crate::*;
use sk_domain::*;
use std::fmt;
use std::path::Path;

/// Wrapper that displays a model as an SMV module.
pub struct Smv<'a>(pub &'a CompiledModel);

pub fn to_smv(model: &CompiledModel) -> String {
    Smv(model).to_string()
}

/// Writes the model to `path`, creating parent directories as needed.
pub fn write_smv(model: &CompiledModel, path: &Path) -> SKResult<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, to_smv(model))?;
    Ok(())
}

const INDENT: &str = "    ";

impl<'a> fmt::Display for Smv<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.0;
        writeln!(f, "MODULE {}", m.name)?;

        writeln!(f, "VAR")?;
        for v in &m.vars {
            writeln!(f, "{INDENT}{v};")?;
        }

        writeln!(f, "ASSIGN")?;
        for a in &m.init {
            writeln!(f, "{INDENT}init({}) := {};", a.var, value(&a.value))?;
        }
        for a in &m.constants {
            writeln!(f, "{INDENT}{} := {};", a.var, value(&a.value))?;
        }
        for (name, table) in &m.tables {
            for (r, row) in table.cells.iter().enumerate() {
                for (c, cell) in row.iter().enumerate() {
                    writeln!(f, "{INDENT}{name}[{}][{}] := {cell};", r + 1, c + 1)?;
                }
            }
        }
        for a in &m.transitions {
            match &a.value {
                Compute::PredicateValue(v) => writeln!(f, "{INDENT}next({}) := {v};", a.var)?,
                Compute::Function(cases) => {
                    writeln!(f, "{INDENT}next({}) :=", a.var)?;
                    writeln!(f, "{INDENT}{INDENT}case")?;
                    for (guard, v) in cases {
                        writeln!(f, "{INDENT}{INDENT}{INDENT}{guard} : {v};")?;
                    }
                    writeln!(f, "{INDENT}{INDENT}esac;")?;
                }
            }
        }

        writeln!(f, "DEFINE")?;
        for p in &m.state_predicates {
            writeln!(f, "{INDENT}{} := {};", p.path, p.predicate)?;
        }

        writeln!(f, "LTLSPEC {};", m.property)
    }
}

fn value(c: &Compute) -> String {
    match c {
        Compute::PredicateValue(v) => v.to_string(),
        Compute::Function(cases) => {
            let body: Vec<String> = cases.iter().map(|(g, v)| format!("{g} : {v};")).collect();
            format!("case {} esac", body.join(" "))
        }
    }
}
