//! Reads back the declarative parts of an SMV module: declarations, initial
//! values, constant assignments, table cells and the property. Case tables
//! and defines are skipped.

use sk_domain::*;
use std::collections::BTreeMap;

#[derive(Debug, PartialEq, Clone)]
pub enum SmvLine {
    Module(String),
    Section(String),
    Decl(Variable),
    Init(SKPath, i64),
    Const(SKPath, i64),
    Cell(SKPath, usize, usize, i64),
    Spec(String),
}

peg::parser! {
    grammar smv_line() for str {
        rule _ = quiet!{[' ' | '\t']*}

        rule ident() -> String
            = s:$(['a'..='z' | 'A'..='Z' | '_'] ['a'..='z' | 'A'..='Z' | '0'..='9' | '_']*) { s.to_string() }

        rule int() -> i64
            = n:$("-"? ['0'..='9']+) {? n.parse().or(Err("integer")) }

        rule index() -> usize
            = n:$(['0'..='9']+) {? n.parse().or(Err("index")) }

        rule range() -> (i64, i64)
            = lo:int() _ ".." _ hi:int() { (lo, hi) }

        rule symbols() -> Vec<String>
            = "{" _ xs:(ident() ** (_ "," _)) _ "}" { xs }

        rule table() -> Domain
            = "array" _ "1" _ ".." _ rows:index() _ "of" _ "array" _ "1" _ ".." _ cols:index() _ "of" _ r:range() {
                Domain::Table { rows, cols, lo: r.0, hi: r.1 }
            }

        rule domain() -> Domain
            = t:table() { t }
            / xs:symbols() { Domain::Enum(xs) }
            / r:range() { Domain::Range(r.0, r.1) }

        rule module() -> SmvLine
            = "MODULE" _ name:ident() { SmvLine::Module(name) }

        rule section() -> SmvLine
            = s:$("VAR" / "ASSIGN" / "DEFINE") { SmvLine::Section(s.to_string()) }

        rule spec() -> SmvLine
            = "LTLSPEC" _ body:$([^ ';']+) ";" { SmvLine::Spec(body.trim().to_string()) }

        rule decl() -> SmvLine
            = name:ident() _ ":" _ d:domain() _ ";" { SmvLine::Decl(Variable::new(&name, d)) }

        rule init() -> SmvLine
            = "init" _ "(" _ name:ident() _ ")" _ ":=" _ v:int() _ ";" { SmvLine::Init(SKPath::from(name), v) }

        rule cell() -> SmvLine
            = name:ident() _ "[" _ r:index() _ "]" _ "[" _ c:index() _ "]" _ ":=" _ v:int() _ ";" {
                SmvLine::Cell(SKPath::from(name), r, c, v)
            }

        rule constant() -> SmvLine
            = name:ident() _ ":=" _ v:int() _ ";" { SmvLine::Const(SKPath::from(name), v) }

        pub rule line() -> SmvLine
            = _ l:(module() / section() / spec() / init() / cell() / decl() / constant()) _ { l }
    }
}

/// One line of SMV, if it is one of the kinds we read.
pub fn parse_line(line: &str) -> Option<SmvLine> {
    smv_line::line(line).ok()
}

/// The declarative parts of a module, in file order.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct SmvSummary {
    pub module: Option<String>,
    pub vars: Vec<Variable>,
    pub init: Vec<(SKPath, i64)>,
    pub constants: Vec<(SKPath, i64)>,
    pub tables: BTreeMap<SKPath, Table>,
    pub property: Option<String>,
}

impl SmvSummary {
    pub fn read(text: &str) -> SKResult<SmvSummary> {
        let mut s = SmvSummary::default();
        let mut cells = vec![];
        for line in text.lines() {
            match parse_line(line) {
                Some(SmvLine::Module(m)) => s.module = Some(m),
                Some(SmvLine::Decl(v)) => s.vars.push(v),
                Some(SmvLine::Init(p, v)) => s.init.push((p, v)),
                Some(SmvLine::Const(p, v)) => s.constants.push((p, v)),
                Some(SmvLine::Cell(p, r, c, v)) => cells.push((p, r, c, v)),
                Some(SmvLine::Spec(body)) => s.property = Some(body),
                Some(SmvLine::Section(_)) | None => {}
            }
        }

        for v in &s.vars {
            if let Domain::Table { rows, cols, .. } = v.domain {
                s.tables
                    .insert(v.path.clone(), Table::new(vec![vec![0; cols]; rows]));
            }
        }
        for (p, r, c, v) in cells {
            let cell = s
                .tables
                .get_mut(&p)
                .and_then(|t| t.cells.get_mut(r.wrapping_sub(1)))
                .and_then(|row| row.get_mut(c.wrapping_sub(1)));
            match cell {
                Some(x) => *x = v,
                None => {
                    return Err(SKError::from_any(format!(
                        "{p}[{r}][{c}] is not inside a declared table"
                    )))
                }
            }
        }
        Ok(s)
    }

    pub fn var(&self, name: &str) -> Option<&Variable> {
        self.vars.iter().find(|v| v.path.as_str() == name)
    }

    pub fn range(&self, name: &str) -> Option<(i64, i64)> {
        match self.var(name).map(|v| &v.domain) {
            Some(Domain::Range(lo, hi)) => Some((*lo, *hi)),
            _ => None,
        }
    }

    pub fn init_value(&self, name: &str) -> Option<i64> {
        self.init
            .iter()
            .find(|(p, _)| p.as_str() == name)
            .map(|(_, v)| *v)
    }
}
