use super::ast::{Node, Root};

/// Render a stylesheet tree back to text from its fields and raws
#[must_use]
pub fn stringify(root: &Root) -> String {
    let mut out = String::new();
    write_nodes(&mut out, &root.nodes, root.raws.semicolon);
    out.push_str(&root.raws.after);
    out
}

fn write_nodes(out: &mut String, nodes: &[Node], semicolon: bool) {
    for (idx, node) in nodes.iter().enumerate() {
        let is_last = idx + 1 == nodes.len();
        write_node(out, node, !is_last || semicolon);
    }
}

/// `semicolon` says whether a statement node gets its terminating `;`.
fn write_node(out: &mut String, node: &Node, semicolon: bool) {
    match node {
        Node::Decl(decl) => {
            out.push_str(&decl.raws.before);
            out.push_str(&decl.prop);
            out.push_str(&decl.raws.between);
            out.push_str(&decl.value);
            out.push_str(&decl.raws.trailing);
            if semicolon {
                out.push(';');
            }
        }
        Node::Rule(rule) => {
            out.push_str(&rule.raws.before);
            out.push_str(&rule.selector);
            out.push_str(&rule.raws.between);
            write_block(out, &rule.nodes, rule.raws.semicolon, &rule.raws.after);
        }
        Node::AtRule(at_rule) => {
            out.push_str(&at_rule.raws.before);
            out.push('@');
            out.push_str(&at_rule.name);
            out.push_str(&at_rule.raws.after_name);
            out.push_str(&at_rule.params);
            out.push_str(&at_rule.raws.between);
            match &at_rule.nodes {
                Some(nodes) => {
                    write_block(out, nodes, at_rule.raws.semicolon, &at_rule.raws.after);
                }
                None if semicolon => out.push(';'),
                None => {}
            }
        }
        Node::Comment(comment) => {
            out.push_str(&comment.raws.before);
            out.push_str("/*");
            out.push_str(&comment.raws.left);
            out.push_str(&comment.text);
            out.push_str(&comment.raws.right);
            out.push_str("*/");
        }
    }
}

fn write_block(out: &mut String, nodes: &[Node], semicolon: bool, after: &str) {
    out.push('{');
    write_nodes(out, nodes, semicolon);
    out.push_str(after);
    out.push('}');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::ast::{Declaration, Rule};
    use crate::css::parser::Parser;

    fn round_trip(css: &str) -> String {
        stringify(&Parser::new(css, None).parse().unwrap())
    }

    #[test]
    fn test_round_trip_preserves_formatting() {
        let samples = [
            "",
            "   \n",
            ".a{color:red}",
            ".a { color : red ;  }\n",
            "\n      header {\n      }\n    ",
            "@charset \"utf-8\";\n@media screen and (max-width: 10px) {\n  .a { b: c; }\n}\n",
            "/* a */ .b { /* c */ d: e !important; ; }",
            "a { b: url(x;y) ; ;}\n;",
            "@font-face{font-family:X}",
            "@import 'a.css'",
        ];

        for css in samples {
            assert_eq!(round_trip(css), css, "round trip of {css:?}");
        }
    }

    #[test]
    fn test_appended_declaration_gets_separator() {
        let mut root = Parser::new(".a { color: red }", None).parse().unwrap();
        let Node::Rule(rule) = &mut root.nodes[0] else {
            panic!("expected rule");
        };
        rule.nodes.push(Node::Decl(Declaration::new("margin", "0")));

        assert_eq!(stringify(&root), ".a { color: red;\n  margin: 0 }");
    }

    #[test]
    fn test_appended_rule() {
        let mut root = Parser::new(".a {}", None).parse().unwrap();
        let mut rule = Rule::new(".b");
        rule.nodes.push(Node::Decl(Declaration::new("color", "blue")));
        root.append(Node::Rule(rule));

        assert_eq!(stringify(&root), ".a {}\n.b {\n  color: blue;\n}");
    }
}
