/// Fills `{name}` placeholders in a template.
///
/// Substitution is a single pass over the template. Inserted values are
/// never scanned again, so values may contain braces or placeholder-like
/// text (property keys and values are user data).
pub struct MessageBuilder {
    template: &'static str,
    vars: Vec<(&'static str, String)>,
}

impl MessageBuilder {
    pub fn new(template: &'static str) -> Self {
        Self {
            template,
            vars: Vec::new(),
        }
    }

    /// Bind `name`. A later binding of the same name replaces an earlier one.
    pub fn var(mut self, name: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.vars.iter_mut().find(|(bound, _)| *bound == name) {
            Some(slot) => slot.1 = value,
            None => self.vars.push((name, value)),
        }
        self
    }

    fn lookup(&self, name: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(bound, _)| *bound == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn build(self) -> String {
        let mut result = String::with_capacity(self.template.len());
        let mut rest = self.template;

        while let Some(open) = rest.find('{') {
            result.push_str(&rest[..open]);
            let after_open = &rest[open + 1..];
            let Some(close) = after_open.find('}') else {
                // Unterminated brace: the remainder is literal text.
                rest = &rest[open..];
                break;
            };

            let name = &after_open[..close];
            match self.lookup(name) {
                Some(value) => result.push_str(value),
                None => {
                    result.push('{');
                    result.push_str(name);
                    result.push('}');
                }
            }
            rest = &after_open[close + 1..];
        }

        result.push_str(rest);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitutes_every_occurrence() {
        let text = MessageBuilder::new("{pid} and {pid}").var("pid", "a").build();
        assert_eq!(text, "a and a");
    }

    #[test]
    fn test_unknown_placeholders_are_left_alone() {
        let text = MessageBuilder::new("PID: {pid}").build();
        assert_eq!(text, "PID: {pid}");
    }

    #[test]
    fn test_inserted_values_are_not_rescanned() {
        for _ in 0..32 {
            let text = MessageBuilder::new("\t{key}={value}")
                .var("key", "greeting")
                .var("value", "Hello {key}")
                .build();
            assert_eq!(text, "\tgreeting=Hello {key}");

            let text = MessageBuilder::new("\t{key}={value}")
                .var("key", "{value}")
                .var("value", "x")
                .build();
            assert_eq!(text, "\t{value}=x");
        }
    }

    #[test]
    fn test_unterminated_brace_is_literal() {
        let text = MessageBuilder::new("{pid} {oops")
            .var("pid", "a")
            .var("oops", "b")
            .build();
        assert_eq!(text, "a {oops");
    }

    #[test]
    fn test_rebinding_replaces_value() {
        let text = MessageBuilder::new("{pid}")
            .var("pid", "first")
            .var("pid", "second")
            .build();
        assert_eq!(text, "second");
    }
}
