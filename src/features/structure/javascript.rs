//! JavaScript/TypeScript structural analysis from regex patterns

use super::generic::{count_delimiters, count_keywords};
use super::{IdentifierPool, StructuralCounts, StructureReport};
use regex::Regex;
use std::sync::OnceLock;

struct JsPatterns {
    /// Each form is counted separately, so `const f = () => {` counts twice.
    function_forms: Vec<Regex>,
    arrow: Regex,
    const_decl: Regex,
    let_decl: Regex,
    var_decl: Regex,
    if_head: Regex,
    for_head: Regex,
    while_head: Regex,
    try_block: Regex,
    class_decl: Regex,
    import_line: Regex,
    require_call: Regex,
    function_name: Regex,
    binding_name: Regex,
}

static PATTERNS: OnceLock<JsPatterns> = OnceLock::new();

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex")
}

fn patterns() -> &'static JsPatterns {
    PATTERNS.get_or_init(|| JsPatterns {
        function_forms: vec![
            re(r"\bfunction\s+\w+"),
            re(r"\bconst\s+\w+\s*=\s*\("),
            re(r"\blet\s+\w+\s*=\s*\("),
            re(r"\bvar\s+\w+\s*=\s*\("),
            re(r"=>\s*\{"),
        ],
        // block-bodied arrows only
        arrow: re(r"=>\s*\{"),
        const_decl: re(r"\bconst\b"),
        let_decl: re(r"\blet\b"),
        var_decl: re(r"\bvar\b"),
        if_head: re(r"\bif\s*\("),
        for_head: re(r"\bfor\s*\("),
        while_head: re(r"\bwhile\s*\("),
        try_block: re(r"\btry\s*\{"),
        class_decl: re(r"\bclass\s+([A-Za-z_$][\w$]*)"),
        import_line: re(r"(?m)^\s*import\b"),
        require_call: re(r"\brequire\s*\("),
        function_name: re(r"\bfunction\b\s*\*?\s*([A-Za-z_$][\w$]*)"),
        binding_name: re(r"\b(?:const|let|var)\s+([A-Za-z_$][\w$]*)"),
    })
}

fn captures(re: &Regex, text: &str) -> Vec<String> {
    re.captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

pub fn analyze(text: &str) -> StructureReport {
    let p = patterns();
    let count = |re: &Regex| re.find_iter(text).count();

    let mut counts = StructuralCounts {
        functions: p.function_forms.iter().map(count).sum(),
        classes: count(&p.class_decl),
        imports: count(&p.import_line) + count(&p.require_call),
        ifs: count(&p.if_head),
        fors: count(&p.for_head),
        whiles: count(&p.while_head),
        tries: count(&p.try_block),
        arrow_functions: count(&p.arrow),
        consts: count(&p.const_decl),
        lets: count(&p.let_decl),
        vars: count(&p.var_decl),
        ..Default::default()
    };
    count_keywords(text, &mut counts, false);
    count_delimiters(text, &mut counts);

    let names = IdentifierPool {
        functions: captures(&p.function_name, text),
        variables: captures(&p.binding_name, text),
        classes: captures(&p.class_decl, text),
    };

    StructureReport { counts, names }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
import fs from 'fs';
const path = require('path');

class FileLoader {
  load(name) {
    try {
      return fs.readFileSync(name);
    } catch (err) {
      return null;
    }
  }
}

function processData(items) {
  let total = 0;
  for (const item of items) {
    if (item > 0) {
      total += item;
    } else {
      continue;
    }
  }
  return total;
}

const handle = (x) => {
  while (x > 0) { x--; }
};
var legacy = 1;
"#;

    #[test]
    fn test_counts() {
        let c = analyze(SAMPLE).counts;
        // function processData, const handle = (, => {
        assert_eq!(c.functions, 3);
        assert_eq!(c.classes, 1);
        assert_eq!(c.imports, 2);
        assert_eq!(c.ifs, 1);
        assert_eq!(c.fors, 1);
        assert_eq!(c.whiles, 1);
        assert_eq!(c.tries, 1);
        assert_eq!(c.arrow_functions, 1);
        assert_eq!(c.consts, 3);
        assert_eq!(c.lets, 1);
        assert_eq!(c.vars, 1);
        assert_eq!(c.elses, 1);
        assert_eq!(c.continues, 1);
        assert_eq!(c.returns, 3);
    }

    #[test]
    fn test_names() {
        let names = analyze(SAMPLE).names;
        assert_eq!(names.functions, vec!["processData".to_string()]);
        assert_eq!(names.classes, vec!["FileLoader".to_string()]);
        assert_eq!(
            names.variables,
            vec!["path", "total", "item", "handle", "legacy"]
                .into_iter()
                .map(String::from)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_expression_arrows_not_counted() {
        let c = analyze("const doubled = xs.map(x => x * 2);\nxs.forEach((x) => {\n  log(x);\n});\n").counts;
        assert_eq!(c.arrow_functions, 1);
    }

    #[test]
    fn test_keyword_inside_identifier_not_counted() {
        let c = analyze("const iffy = notify(format);").counts;
        assert_eq!(c.ifs, 0);
        assert_eq!(c.fors, 0);
    }
}
