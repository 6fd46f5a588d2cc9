use std::collections::HashMap;

use crate::types::types::Type;

/// What a name is bound to in some scope.
#[derive(Debug, Clone, PartialEq)]
pub enum Symbol {
    Variable { ty: Type },
    Parameter { ty: Type },
    Function { params: Vec<Type>, return_type: Type },
}

impl Symbol {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Symbol::Variable { .. } => "variable",
            Symbol::Parameter { .. } => "parameter",
            Symbol::Function { .. } => "function",
        }
    }
}

/// Stack of lexical scopes, innermost last.
///
/// Every `push` is paired with a `pop` by the checker even on error
/// paths, so a failed pass never leaks scopes. The global scope stays
/// at the bottom for the whole run; it backs the symbol table dump.
#[derive(Debug)]
pub struct ScopeStack {
    scopes: Vec<HashMap<String, Symbol>>,
}

impl ScopeStack {
    pub fn new() -> ScopeStack {
        ScopeStack {
            scopes: vec![HashMap::new()],
        }
    }

    pub fn push(&mut self) {
        self.scopes.push(HashMap::new());
    }

    pub fn pop(&mut self) {
        // The global scope is never popped.
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Binds `name` in the innermost scope. Returns false when the name
    /// is already bound there; shadowing an outer scope is fine.
    pub fn declare(&mut self, name: &str, symbol: Symbol) -> bool {
        let scope = match self.scopes.last_mut() {
            Some(scope) => scope,
            None => return false,
        };
        if scope.contains_key(name) {
            return false;
        }
        scope.insert(String::from(name), symbol);
        true
    }

    /// Innermost binding for `name`, searching outward.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    pub fn globals(&self) -> &HashMap<String, Symbol> {
        &self.scopes[0]
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        ScopeStack::new()
    }
}

/// Renders a scope as a three column report (name, kind, type), sorted
/// by name. The "dump symbols" path of the driver feeds it the global
/// scope after a successful check.
pub fn symbol_table(scope: &HashMap<String, Symbol>) -> String {
    let mut names: Vec<&String> = scope.keys().collect();
    names.sort();

    let mut out = String::from("name            kind       type\n");
    for name in names {
        let symbol = &scope[name];
        let ty = match symbol {
            Symbol::Variable { ty } | Symbol::Parameter { ty } => ty.to_string(),
            Symbol::Function {
                params,
                return_type,
            } => {
                let params: Vec<String> = params.iter().map(|p| p.to_string()).collect();
                format!("({}) -> {}", params.join(", "), return_type)
            }
        };
        out.push_str(&format!("{:<15} {:<10} {}\n", name, symbol.kind_name(), ty));
    }
    out
}
