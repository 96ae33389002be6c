//! Integration tests for specificity and canonical serialization.

use cssxpath::{Specificity, parse};

fn specificity(css: &str) -> (u32, u32, u32) {
    let selectors = parse(css).unwrap();
    assert_eq!(selectors.len(), 1);
    selectors[0].specificity().as_tuple()
}

/// `css` must serialize to `expected`, and the result must be stable.
fn css2css(css: &str, expected: &str) {
    let selectors = parse(css).unwrap();
    assert_eq!(selectors.len(), 1);
    let canonical = selectors[0].canonical();
    assert_eq!(canonical, expected, "{css}");

    let reparsed = parse(&canonical).unwrap();
    assert_eq!(reparsed[0].canonical(), canonical, "{canonical} is not stable");
}

#[test]
fn test_simple_selectors() {
    assert_eq!(specificity("*"), (0, 0, 0));
    assert_eq!(specificity(" foo"), (0, 0, 1));
    assert_eq!(specificity(":empty "), (0, 1, 0));
    assert_eq!(specificity(":nth-child(2)"), (0, 1, 0));
    assert_eq!(specificity(".bar"), (0, 1, 0));
    assert_eq!(specificity("[baz]"), (0, 1, 0));
    assert_eq!(specificity("[baz=\"4\"]"), (0, 1, 0));
    assert_eq!(specificity("[baz^=\"4\"]"), (0, 1, 0));
    assert_eq!(specificity("#lipsum"), (1, 0, 0));
}

#[test]
fn test_pseudo_elements_count_as_types() {
    assert_eq!(specificity(":before"), (0, 0, 1));
    assert_eq!(specificity("*:before"), (0, 0, 1));
    assert_eq!(specificity("::attr(name)"), (0, 0, 1));
    assert_eq!(specificity("foo:before"), (0, 0, 2));
    assert_eq!(specificity("foo::before"), (0, 0, 2));
    assert_eq!(specificity("foo:empty::before"), (0, 1, 2));
}

#[test]
fn test_negation_and_relation() {
    assert_eq!(specificity(":not(*)"), (0, 0, 0));
    assert_eq!(specificity(":not(foo)"), (0, 0, 1));
    assert_eq!(specificity(":not(.foo)"), (0, 1, 0));
    assert_eq!(specificity(":not([foo])"), (0, 1, 0));
    assert_eq!(specificity(":not(:empty)"), (0, 1, 0));
    assert_eq!(specificity(":not(#foo)"), (1, 0, 0));

    assert_eq!(specificity(":has(*)"), (0, 0, 0));
    assert_eq!(specificity(":has(foo)"), (0, 0, 1));
    assert_eq!(specificity(":has(.foo)"), (0, 1, 0));
    assert_eq!(specificity(":has(> foo)"), (0, 0, 1));
}

#[test]
fn test_matching_takes_the_most_specific_branch() {
    assert_eq!(specificity(":is(.foo, #bar)"), (1, 0, 0));
    assert_eq!(specificity(":is(:hover, :visited)"), (0, 1, 0));
    assert_eq!(specificity("a:is(b.c, d)"), (0, 1, 2));
}

#[test]
fn test_where_adds_nothing() {
    assert_eq!(specificity(":where(:hover, :visited)"), (0, 0, 0));
    assert_eq!(specificity("a.b:where(#c)"), (0, 1, 1));
}

#[test]
fn test_combined_selectors_sum() {
    assert_eq!(specificity("foo:empty"), (0, 1, 1));
    assert_eq!(
        specificity("#lorem + foo#ipsum:first-child > bar:first-line"),
        (2, 1, 3)
    );
}

#[test]
fn test_specificity_ordering() {
    assert!(Specificity(1, 0, 0) > Specificity(0, 10, 10));
    assert!(Specificity(0, 1, 0) > Specificity(0, 0, 99));
    assert_eq!(Specificity(0, 1, 2) + Specificity(1, 0, 1), Specificity(1, 1, 3));
    assert_eq!(Specificity::new(2, 1, 3).to_string(), "(2, 1, 3)");
}

#[test]
fn test_canonical_is_unchanged() {
    for css in [
        "*",
        "Foo",
        ":nth-child(2)",
        ".bar",
        "[baz]",
        "[ns|attr='4']",
        "#lipsum",
        ":not(*)",
        ":not(foo)",
        ":not(:empty)",
        ":not(#foo)",
        ":has(*)",
        ":has(foo)",
        ":is(#bar, .foo)",
        ":is(:focused, :visited)",
        ":where(:focused, :visited)",
        "foo:empty",
        "foo::before",
        "foo:empty::before",
        "#lorem + foo#ipsum:first-child > bar::first-line",
        "foo > *",
    ] {
        css2css(css, css);
    }
}

#[test]
fn test_canonical_normalizes() {
    css2css(" foo", "foo");
    css2css(":empty ", ":empty");
    css2css(":before", "::before");
    css2css(":beFOre", "::before");
    css2css("*:before", "::before");
    css2css("[baz=\"4\"]", "[baz='4']");
    css2css("[baz^=\"4\"]", "[baz^='4']");
    css2css(":not(*.foo)", ":not(.foo)");
    css2css(":not(*[foo])", ":not([foo])");
    css2css(":has(*.foo)", ":has(.foo)");
    css2css(":has(>  a)", ":has(> a)");
    css2css("::name(arg + \"val\" - 3)", "::name(arg+'val'-3)");
    css2css(":matches(a,b)", ":is(a, b)");
    css2css("a   ~b", "a ~ b");
}

#[test]
fn test_canonical_escapes() {
    css2css("[a=\"it's\"]", "[a=\"it's\"]");
    css2css("[a='x\\a y']", "[a='x\\a y']");
    css2css("di\\[v", "di\\[v");
    css2css("#\\31 23", "#123");
    css2css(".\\31 23", ".\\31 23");
}
