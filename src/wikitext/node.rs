//! Inline content nodes — plain text fragments and template occurrences.

use serde::Serialize;
use smallvec::SmallVec;

/// One inline node of a section body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum InlineNode {
    Text(String),
    Template(Template),
}

impl InlineNode {
    pub fn text(s: impl Into<String>) -> Self {
        InlineNode::Text(s.into())
    }

    pub fn is_template(&self) -> bool {
        matches!(self, InlineNode::Template(_))
    }

    pub fn as_template(&self) -> Option<&Template> {
        match self {
            InlineNode::Template(t) => Some(t),
            InlineNode::Text(_) => None,
        }
    }
}

impl From<Template> for InlineNode {
    fn from(t: Template) -> Self {
        InlineNode::Template(t)
    }
}

/// A template occurrence: `{{name|arg|key=arg|...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Template {
    pub name: String,
    pub args: SmallVec<[TemplateArg; 4]>,
}

/// One template argument. Positional arguments have `name == None`;
/// argument values are themselves inline node sequences, since templates
/// may nest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TemplateArg {
    pub name: Option<String>,
    pub value: Vec<InlineNode>,
}

impl TemplateArg {
    pub fn positional(value: impl Into<String>) -> Self {
        Self { name: None, value: vec![InlineNode::text(value)] }
    }

    pub fn named(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: Some(name.into()), value: vec![InlineNode::text(value)] }
    }

    /// Flattened text of the argument value. Nested templates contribute
    /// nothing; only text fragments are concatenated.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for node in &self.value {
            if let InlineNode::Text(s) = node {
                out.push_str(s);
            }
        }
        out
    }
}

impl Template {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), args: SmallVec::new() }
    }

    /// Append a positional text argument.
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(TemplateArg::positional(value));
        self
    }

    /// Append a named argument.
    pub fn named_arg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.push(TemplateArg::named(name, value));
        self
    }

    /// Append a positional argument whose value is a nested template.
    pub fn template_arg(mut self, t: Template) -> Self {
        self.args.push(TemplateArg { name: None, value: vec![InlineNode::Template(t)] });
        self
    }

    /// Positional arguments in order, skipping named ones.
    pub fn positional(&self) -> impl Iterator<Item = &TemplateArg> {
        self.args.iter().filter(|a| a.name.is_none())
    }

    /// Flattened text of the i-th positional argument.
    pub fn positional_text(&self, i: usize) -> Option<String> {
        self.positional().nth(i).map(TemplateArg::text)
    }

    /// Flattened text of a named argument.
    pub fn named(&self, name: &str) -> Option<String> {
        self.args
            .iter()
            .find(|a| a.name.as_deref() == Some(name))
            .map(TemplateArg::text)
    }
}

/// Direct template children of an inline node sequence, in document order.
pub fn direct_templates(nodes: &[InlineNode]) -> impl Iterator<Item = &Template> {
    nodes.iter().filter_map(InlineNode::as_template)
}

/// Every template in the sequence, pre-order, recursing into template
/// argument values. Depth is bounded by document nesting depth.
pub fn descendant_templates(nodes: &[InlineNode]) -> Vec<&Template> {
    let mut out = Vec::new();
    collect(nodes, &mut out);
    out
}

fn collect<'a>(nodes: &'a [InlineNode], out: &mut Vec<&'a Template>) {
    for node in nodes {
        if let InlineNode::Template(t) = node {
            out.push(t);
            for arg in &t.args {
                collect(&arg.value, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_and_named() {
        let t = Template::new("bor")
            .arg("es")
            .arg("la")
            .named_arg("gloss", "word")
            .arg("verbum");
        assert_eq!(t.positional_text(0), Some("es".into()));
        assert_eq!(t.positional_text(1), Some("la".into()));
        assert_eq!(t.positional_text(2), Some("verbum".into()));
        assert_eq!(t.named("gloss"), Some("word".into()));
        assert_eq!(t.positional_text(3), None);
    }

    #[test]
    fn test_direct_templates_skips_text() {
        let nodes = vec![
            InlineNode::text("From "),
            Template::new("m").arg("la").arg("verbum").into(),
            InlineNode::text("."),
        ];
        let names: Vec<_> = direct_templates(&nodes).map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["m"]);
    }

    #[test]
    fn test_descendant_templates_recurses_into_args() {
        let inner = Template::new("desc").arg("fr").arg("mot");
        let outer = Template::new("desctree").arg("it").template_arg(inner);
        let nodes = vec![InlineNode::Template(outer)];
        let names: Vec<_> = descendant_templates(&nodes)
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(names, vec!["desctree", "desc"]);
    }
}
