/// A context to use when evaluating a function, containing the values of its free variables.
///
/// Sampling loops evaluate the same function thousands of times with different values for the
/// same variables. [`Ctxt::add_var`] overwrites an existing binding in place, so a single context
/// can be reused for the whole loop without allocating.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ctxt {
    /// The variables in the context.
    vars: Vec<(String, f64)>,
}

impl Ctxt {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context with a single variable.
    pub fn with_var(name: &str, value: f64) -> Self {
        let mut ctxt = Self::new();
        ctxt.add_var(name, value);
        ctxt
    }

    /// Adds a variable to the context, replacing the value of the variable if it already exists.
    pub fn add_var(&mut self, name: &str, value: f64) {
        match self.vars.iter_mut().find(|(var, _)| var == name) {
            Some((_, slot)) => *slot = value,
            None => self.vars.push((name.to_string(), value)),
        }
    }

    /// Returns the value of the given variable, if it is bound.
    pub fn get_var(&self, name: &str) -> Option<f64> {
        self.vars.iter()
            .find(|(var, _)| var == name)
            .map(|(_, value)| *value)
    }

    /// Returns an iterator over the names of the bound variables, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vars.iter().map(|(name, _)| name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overwrite_in_place() {
        let mut ctxt = Ctxt::new();
        ctxt.add_var("x", 1.0);
        ctxt.add_var("y", 2.0);
        ctxt.add_var("x", 3.0);

        assert_eq!(ctxt.get_var("x"), Some(3.0));
        assert_eq!(ctxt.get_var("y"), Some(2.0));
        assert_eq!(ctxt.names().collect::<Vec<_>>(), vec!["x", "y"]);
    }

    #[test]
    fn missing_var() {
        assert_eq!(Ctxt::with_var("t", 0.5).get_var("x"), None);
    }
}
