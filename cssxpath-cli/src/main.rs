//! `cssxpath`: compile CSS selectors to XPath 1.0 expressions.

mod warning;

use std::str::FromStr;

use clap::Parser;
use cssxpath::{
    DEFAULT_PREFIX, GenericTranslator, HtmlTranslator, PseudoClass, PseudoElement, Selector,
    SelectorNode, Translator, parse, tokenize,
};
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::warning::{clear_warnings, warn_once};

#[derive(Parser, Debug)]
#[command(name = "cssxpath")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r"EXAMPLES:
    # Translate a selector with the generic rules
    cssxpath 'div > p.intro'

    # HTML documents: case-insensitive names, :checked, :link, :lang()
    cssxpath --html 'INPUT:checked, a:link'

    # Evaluate relative to the context node only
    cssxpath --prefix '' 'ul > li:nth-child(2n+1)'

    # Show tokens, specificity and canonical form
    cssxpath --tokens --specificity --canonical ':matches(a, b)'

    # Machine-readable output
    cssxpath --json '#main a[href^=http]'
")]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// CSS selector groups to translate
    #[arg(value_name = "SELECTOR", required = true)]
    selectors: Vec<String>,

    /// Use HTML rules: case-insensitive names and HTML pseudo-classes
    #[arg(long, conflicts_with = "xhtml")]
    html: bool,

    /// Use HTML pseudo-classes with case-sensitive names
    #[arg(long)]
    xhtml: bool,

    /// Prefix prepended to every XPath expression
    #[arg(long, value_name = "PREFIX", default_value = DEFAULT_PREFIX)]
    prefix: String,

    /// Translate pseudo-elements instead of dropping them
    #[arg(short = 'k', long)]
    keep_pseudo_elements: bool,

    /// Print the token stream of each input
    #[arg(long)]
    tokens: bool,

    /// Print the specificity of each selector
    #[arg(long)]
    specificity: bool,

    /// Print the canonical CSS of each selector
    #[arg(long)]
    canonical: bool,

    /// Print one JSON report per input instead of plain text
    #[arg(long)]
    json: bool,
}

/// Everything computed for one command-line input.
#[derive(Serialize, Debug)]
struct Report {
    css: String,
    xpath: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tokens: Option<Vec<String>>,
    selectors: Vec<SelectorReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<Warning>,
}

/// A part of the input that compiles to something unhelpful.
#[derive(Serialize, Debug, PartialEq, Eq)]
struct Warning {
    component: &'static str,
    message: String,
}

/// One selector of a group.
#[derive(Serialize, Debug)]
struct SelectorReport {
    canonical: String,
    specificity: (u32, u32, u32),
    #[serde(skip_serializing_if = "Option::is_none")]
    pseudo_element: Option<String>,
    xpath: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let translator = translator(&cli);

    let mut failures = 0;
    for css in &cli.selectors {
        clear_warnings();
        match compile(translator.as_ref(), css, &cli) {
            Ok(report) => {
                for warning in &report.warnings {
                    warn_once(warning.component, &warning.message);
                }
                if cli.json {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                } else {
                    print_report(&report, &cli);
                }
            }
            Err(err) => {
                failures += 1;
                eprintln!("{} {css}: {err}", "error:".red().bold());
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} inputs failed to translate", cli.selectors.len());
    }
    Ok(())
}

/// Pick the document-language rules requested on the command line.
fn translator(cli: &Cli) -> Box<dyn Translator> {
    if cli.xhtml {
        Box::new(HtmlTranslator::xhtml())
    } else if cli.html {
        Box::new(HtmlTranslator::new())
    } else {
        Box::new(GenericTranslator::new())
    }
}

/// Parse and translate one input, collecting what the flags ask for.
fn compile(translator: &dyn Translator, css: &str, cli: &Cli) -> cssxpath::Result<Report> {
    let tokens = if cli.tokens {
        Some(tokenize(css)?.iter().map(ToString::to_string).collect())
    } else {
        None
    };

    let selectors = parse(css)?;
    let mut reports = Vec::with_capacity(selectors.len());
    let mut warnings = Vec::new();
    for selector in &selectors {
        warnings.extend(lossy_parts(selector, cli.keep_pseudo_elements));
        let xpath = translator.selector_to_xpath(selector, &cli.prefix, cli.keep_pseudo_elements)?;
        reports.push(SelectorReport {
            canonical: selector.canonical(),
            specificity: selector.specificity().as_tuple(),
            pseudo_element: selector.pseudo_element.as_ref().map(PseudoElement::canonical),
            xpath,
        });
    }

    let xpath = reports
        .iter()
        .map(|report| report.xpath.as_str())
        .collect::<Vec<_>>()
        .join(" | ");
    Ok(Report {
        css: css.to_owned(),
        xpath,
        tokens,
        selectors: reports,
        warnings,
    })
}

/// Parts of `selector` that cannot influence the result.
fn lossy_parts(selector: &Selector, keep_pseudo_elements: bool) -> Vec<Warning> {
    let mut warnings = Vec::new();
    let dropped = selector
        .pseudo_element
        .as_ref()
        .filter(|_| !keep_pseudo_elements);
    if let Some(pseudo_element) = dropped {
        warnings.push(Warning {
            component: "pseudo-element",
            message: format!(
                "::{} is dropped; pass --keep-pseudo-elements to translate it",
                pseudo_element.canonical()
            ),
        });
    }

    let mut pseudo_classes = Vec::new();
    selector.parsed_tree.walk(&mut |node| {
        if let SelectorNode::Pseudo { ident, .. } = node {
            pseudo_classes.push(ident.clone());
        }
    });
    warnings.extend(
        pseudo_classes
            .into_iter()
            .filter(|ident| PseudoClass::from_str(ident).is_ok_and(PseudoClass::is_interactive))
            .map(|ident| Warning {
                component: "pseudo-class",
                message: format!(":{ident} depends on user interaction and never matches"),
            }),
    );
    warnings
}

fn print_report(report: &Report, cli: &Cli) {
    let verbose = cli.tokens || cli.specificity || cli.canonical;
    if !verbose {
        println!("{}", report.xpath);
        return;
    }

    println!("{}", report.css);
    if let Some(tokens) = &report.tokens {
        for token in tokens {
            println!("  token: {token}");
        }
    }
    for selector in &report.selectors {
        if cli.canonical {
            println!("  canonical: {}", selector.canonical);
        }
        if cli.specificity {
            let (a, b, c) = selector.specificity;
            println!("  specificity: ({a}, {b}, {c})");
        }
        println!("  xpath: {}", selector.xpath);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("cssxpath").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let cli = cli(&["div"]);
        assert_eq!(cli.prefix, DEFAULT_PREFIX);
        assert!(!cli.html && !cli.xhtml && !cli.keep_pseudo_elements);
    }

    #[test]
    fn test_html_and_xhtml_conflict() {
        let args = ["cssxpath", "--html", "--xhtml", "div"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_compile_group() {
        let cli = cli(&["--prefix", "", "--tokens", "a, b::before"]);
        let report = compile(translator(&cli).as_ref(), "a, b::before", &cli).unwrap();
        assert_eq!(report.xpath, "a | b");
        assert_eq!(report.selectors.len(), 2);
        assert_eq!(report.selectors[1].pseudo_element.as_deref(), Some("before"));
        assert_eq!(report.selectors[1].specificity, (0, 0, 2));
        assert_eq!(report.tokens.as_ref().map(|tokens| tokens[0].as_str()), Some("<IDENT 'a' at 0>"));
    }

    #[test]
    fn test_compile_html() {
        let cli = cli(&["--html", "--prefix", "", "DIV"]);
        let report = compile(translator(&cli).as_ref(), "DIV", &cli).unwrap();
        assert_eq!(report.xpath, "div");
    }

    #[test]
    fn test_compile_errors() {
        let cli = cli(&["--prefix", "", "x"]);
        let translator = translator(&cli);
        assert!(compile(translator.as_ref(), "a[", &cli).unwrap_err().is_syntax());
        assert!(compile(translator.as_ref(), ":lorem", &cli).unwrap_err().is_expression());
    }

    #[test]
    fn test_lossy_parts() {
        let selectors = parse("a:not(:hover)::before, b:visited, c:empty").unwrap();
        let components = |selector, keep| {
            lossy_parts(selector, keep)
                .into_iter()
                .map(|warning| warning.component)
                .collect::<Vec<_>>()
        };
        assert_eq!(components(&selectors[0], false), ["pseudo-element", "pseudo-class"]);
        assert_eq!(components(&selectors[0], true), ["pseudo-class"]);
        assert_eq!(
            lossy_parts(&selectors[1], false)[0].message,
            ":visited depends on user interaction and never matches"
        );
        assert!(lossy_parts(&selectors[2], false).is_empty());
    }

    #[test]
    fn test_json_report() {
        let cli = cli(&["--prefix", "", "#a"]);
        let report = compile(translator(&cli).as_ref(), "#a", &cli).unwrap();
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["xpath"], "*[@id = 'a']");
        assert_eq!(json["selectors"][0]["specificity"], serde_json::json!([1, 0, 0]));
        assert!(json.get("tokens").is_none());
        assert!(json.get("warnings").is_none());
    }
}
