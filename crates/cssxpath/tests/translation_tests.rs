//! Integration tests for the generic XPath translator.

use cssxpath::{DEFAULT_PREFIX, GenericTranslator, SelectorError, Translator, TranslatorOptions, parse};

fn xpath(css: &str) -> String {
    GenericTranslator::new().css_to_xpath(css, "").unwrap()
}

fn css_to_xpath(css: &str) -> String {
    GenericTranslator::new().css_to_xpath(css, DEFAULT_PREFIX).unwrap()
}

fn expression_error(css: &str) -> String {
    match GenericTranslator::new().css_to_xpath(css, "") {
        Err(SelectorError::Expression(error)) => error.to_string(),
        other => panic!("{css}: expected an expression error, got {other:?}"),
    }
}

const CLASS_WARNING: &str = "@class and contains(concat(' ', normalize-space(@class), ' '), ' warning ')";

#[test]
fn test_elements_and_namespaces() {
    assert_eq!(xpath("*"), "*");
    assert_eq!(xpath("e"), "e");
    assert_eq!(xpath("*|e"), "e");
    assert_eq!(xpath("|e"), "e");
    assert_eq!(xpath("e|f"), "e:f");
    assert_eq!(xpath("e|*"), "e:*");
}

#[test]
fn test_attribute_operators() {
    assert_eq!(xpath("e[foo]"), "e[@foo]");
    assert_eq!(xpath("e[foo|bar]"), "e[@foo:bar]");
    assert_eq!(xpath("e[foo=\"bar\"]"), "e[@foo = 'bar']");
    assert_eq!(
        xpath("e[foo~=\"bar\"]"),
        "e[@foo and contains(concat(' ', normalize-space(@foo), ' '), ' bar ')]"
    );
    assert_eq!(xpath("e[foo^=\"bar\"]"), "e[@foo and starts-with(@foo, 'bar')]");
    assert_eq!(
        xpath("e[foo$=\"bar\"]"),
        "e[@foo and substring(@foo, string-length(@foo)-2) = 'bar']"
    );
    assert_eq!(xpath("e[foo*=\"bar\"]"), "e[@foo and contains(@foo, 'bar')]");
    assert_eq!(
        xpath("e[hreflang|=\"en\"]"),
        "e[@hreflang and (@hreflang = 'en' or starts-with(@hreflang, 'en-'))]"
    );
    assert_eq!(xpath("e[foo!=\"bar\"]"), "e[not(@foo) or @foo != 'bar']");
    assert_eq!(xpath("e[foo!=\"\"]"), "e[@foo != '']");
}

#[test]
fn test_empty_attribute_values_never_match() {
    assert_eq!(xpath("e[foo^=\"\"]"), "e[0]");
    assert_eq!(xpath("e[foo$=\"\"]"), "e[0]");
    assert_eq!(xpath("e[foo*=\"\"]"), "e[0]");
    assert_eq!(xpath("e[foo~=\"\"]"), "e[0]");
    assert_eq!(xpath("e[foo~=\"a b\"]"), "e[0]");
    assert_eq!(xpath("e[foo=\"\"]"), "e[@foo = '']");
}

#[test]
fn test_suffix_counts_characters() {
    assert_eq!(
        xpath("e[foo$=\"\u{e9}t\u{e9}\"]"),
        "e[@foo and substring(@foo, string-length(@foo)-2) = '\u{e9}t\u{e9}']"
    );
}

#[test]
fn test_nth_child() {
    assert_eq!(xpath("e:nth-child(1)"), "e[count(preceding-sibling::*) = 0]");
    // always true
    assert_eq!(xpath("e:nth-child(n)"), "e");
    assert_eq!(xpath("e:nth-child(n+1)"), "e");
    assert_eq!(xpath("e:nth-child(n-10)"), "e");
    // b=2 is the limit
    assert_eq!(xpath("e:nth-child(n+2)"), "e[count(preceding-sibling::*) >= 1]");
    // always false
    assert_eq!(xpath("e:nth-child(-n)"), "e[0]");
    assert_eq!(xpath("e:nth-child(0)"), "e[0]");
    assert_eq!(xpath("e:nth-child(-n+1)"), "e[count(preceding-sibling::*) <= 0]");
    assert_eq!(
        xpath("e:nth-child(3n+2)"),
        "e[(count(preceding-sibling::*) >= 1) and ((count(preceding-sibling::*) +2) mod 3 = 0)]"
    );
    assert_eq!(xpath("e:nth-child(3n-2)"), "e[count(preceding-sibling::*) mod 3 = 0]");
    assert_eq!(xpath("e:nth-child(-n+6)"), "e[count(preceding-sibling::*) <= 5]");
    assert_eq!(
        xpath("e:nth-child(-2n+5)"),
        "e[(count(preceding-sibling::*) <= 4) and (count(preceding-sibling::*) mod 2 = 0)]"
    );
}

#[test]
fn test_nth_child_out_of_range() {
    assert_eq!(
        expression_error("e:nth-child(-9223372036854775808)"),
        "Invalid series: 0n-9223372036854775808 is out of range"
    );
    assert_eq!(
        expression_error("e:nth-child(-9223372036854775808n+2)"),
        "Invalid series: -9223372036854775808n+2 is out of range"
    );
    assert_eq!(
        xpath("e:nth-child(9223372036854775807n)"),
        "e[(count(preceding-sibling::*) +1) mod 9223372036854775807 = 0]"
    );
}

#[test]
fn test_nth_last_child() {
    assert_eq!(xpath("e:nth-last-child(1)"), "e[count(following-sibling::*) = 0]");
    assert_eq!(xpath("e:nth-last-child(2n)"), "e[(count(following-sibling::*) +1) mod 2 = 0]");
    assert_eq!(xpath("e:nth-last-child(2n+1)"), "e[count(following-sibling::*) mod 2 = 0]");
    assert_eq!(
        xpath("e:nth-last-child(2n+2)"),
        "e[(count(following-sibling::*) >= 1) and ((count(following-sibling::*) +1) mod 2 = 0)]"
    );
    assert_eq!(xpath("e:nth-last-child(3n+1)"), "e[count(following-sibling::*) mod 3 = 0]");
    // the two last e elements
    assert_eq!(xpath("e:nth-last-child(-n+2)"), "e[count(following-sibling::*) <= 1]");
}

#[test]
fn test_nth_of_type() {
    assert_eq!(xpath("e:nth-of-type(1)"), "e[count(preceding-sibling::e) = 0]");
    assert_eq!(xpath("e:nth-last-of-type(1)"), "e[count(following-sibling::e) = 0]");
    assert_eq!(
        xpath("div e:nth-last-of-type(1) .aclass"),
        "div/descendant-or-self::*/e[count(following-sibling::e) = 0]\
         /descendant-or-self::*/*[@class and contains(concat(' ', normalize-space(@class), ' '), ' aclass ')]"
    );
}

#[test]
fn test_structural_pseudo_classes() {
    assert_eq!(xpath("e:first-child"), "e[count(preceding-sibling::*) = 0]");
    assert_eq!(xpath("e:last-child"), "e[count(following-sibling::*) = 0]");
    assert_eq!(xpath("e:first-of-type"), "e[count(preceding-sibling::e) = 0]");
    assert_eq!(xpath("e:last-of-type"), "e[count(following-sibling::e) = 0]");
    assert_eq!(xpath("e:only-child"), "e[count(parent::*/child::*) = 1]");
    assert_eq!(xpath("e:only-of-type"), "e[count(parent::*/child::e) = 1]");
    assert_eq!(xpath("e:empty"), "e[not(*) and not(string-length())]");
    assert_eq!(xpath("e:EmPTY"), "e[not(*) and not(string-length())]");
    assert_eq!(xpath("e:root"), "e[not(parent::*)]");
    assert_eq!(xpath(":scope"), "*[1]");
}

#[test]
fn test_interactive_pseudo_classes_never_match() {
    for css in [
        "e:hover",
        "e:visited",
        "e:active",
        "e:focus",
        "e:focus-within",
        "e:target",
        "e:target-within",
        "e:link",
        "e:checked",
        "e:enabled",
        "e:disabled",
    ] {
        assert_eq!(xpath(css), "e[0]", "{css}");
    }
}

#[test]
fn test_has() {
    assert_eq!(
        xpath("div:has(bar.foo)"),
        "div[descendant::bar[@class and contains(concat(' ', normalize-space(@class), ' '), ' foo ')]]"
    );
    assert_eq!(xpath("e:has(> f)"), "e[./f]");
    assert_eq!(xpath("e:has(f)"), "e[descendant::f]");
    assert_eq!(xpath("e:has(~ f)"), "e[following-sibling::f]");
    assert_eq!(
        xpath("e:has(+ f)"),
        "e[following-sibling::*[(name() = 'f') and (position() = 1)]]"
    );
    assert_eq!(xpath("e:has(> f > g)"), "e[./f/g]");
    assert_eq!(xpath("e:has(f g)"), "e[descendant::f/descendant-or-self::*/g]");
}

#[test]
fn test_functions() {
    assert_eq!(xpath("e:contains(\"foo\")"), "e[contains(., 'foo')]");
    assert_eq!(xpath("e:ConTains(foo)"), "e[contains(., 'foo')]");
    assert_eq!(xpath("e:lang(fr)"), "e[lang('fr')]");
}

#[test]
fn test_class_id_and_negation() {
    assert_eq!(xpath("e.warning"), format!("e[{CLASS_WARNING}]"));
    assert_eq!(xpath("e#myid"), "e[@id = 'myid']");
    assert_eq!(
        xpath("e:not(:nth-child(odd))"),
        "e[not(count(preceding-sibling::*) mod 2 = 0)]"
    );
    assert_eq!(xpath("e:nOT(*)"), "e[0]");
    assert_eq!(xpath("e:not(f)"), "e[not(name() = 'f')]");
}

#[test]
fn test_combinators() {
    assert_eq!(xpath("e f"), "e/descendant-or-self::*/f");
    assert_eq!(xpath("e > f"), "e/f");
    assert_eq!(
        xpath("e + f"),
        "e/following-sibling::*[(name() = 'f') and (position() = 1)]"
    );
    assert_eq!(xpath("e ~ f"), "e/following-sibling::f");
    assert_eq!(
        xpath("e ~ f:nth-child(3)"),
        "e/following-sibling::f[count(preceding-sibling::*) = 2]"
    );
    assert_eq!(xpath("div#container p"), "div[@id = 'container']/descendant-or-self::*/p");
}

#[test]
fn test_is_and_where() {
    assert_eq!(xpath("e:where(foo)"), "e[name() = 'foo']");
    assert_eq!(xpath("e:where(foo, bar)"), "e[(name() = 'foo') or (name() = 'bar')]");
    assert_eq!(
        xpath("e:is(.warning, #x)"),
        format!("e[({CLASS_WARNING}) or (@id = 'x')]")
    );
    // A branch without a condition matches every element.
    assert_eq!(xpath("e:is(*, .a)"), "e");
    assert_eq!(xpath("e.warning:is(f)"), format!("e[({CLASS_WARNING}) and (name() = 'f')]"));
}

#[test]
fn test_unsafe_names() {
    assert_eq!(xpath("di\\a0 v"), "*[name() = 'di\u{a0}v']");
    assert_eq!(xpath("di\\[v"), "*[name() = 'di[v']");
    assert_eq!(xpath("[h\\a0 ref]"), "*[attribute::*[name() = 'h\u{a0}ref']]");
    assert_eq!(xpath("[h\\]ref]"), "*[attribute::*[name() = 'h]ref']]");
}

#[test]
fn test_selector_groups_are_unioned() {
    assert_eq!(xpath("a, b"), "a | b");
    assert_eq!(css_to_xpath("a, b"), "descendant-or-self::a | descendant-or-self::b");
}

#[test]
fn test_expression_errors() {
    assert_eq!(expression_error(":f\u{130}rst-child"), "The pseudo-class :f\u{130}rst-child is unknown");
    assert_eq!(expression_error(":first-of-type"), "*:first-of-type is not implemented");
    assert_eq!(expression_error(":only-of-type"), "*:only-of-type is not implemented");
    assert_eq!(expression_error(":last-of-type"), "*:last-of-type is not implemented");
    assert_eq!(expression_error(":nth-of-type(1)"), "*:nth-of-type() is not implemented");
    assert_eq!(expression_error(":nth-last-of-type(1)"), "*:nth-last-of-type() is not implemented");
    assert_eq!(
        expression_error(":nth-child(n-)"),
        "Invalid series: 'n-' does not match An+B"
    );
    assert_eq!(
        expression_error(":nth-child('2n')"),
        "Invalid series: string tokens are not allowed in a series"
    );
    assert_eq!(expression_error(":after"), "Pseudo-elements are not supported.");
    assert_eq!(expression_error(":lorem-ipsum"), "The pseudo-class :lorem-ipsum is unknown");
    assert_eq!(expression_error(":lorem(ipsum)"), "The pseudo-class :lorem() is unknown");
    assert_eq!(expression_error("::lorem-ipsum"), "Pseudo-elements are not supported.");
    assert_eq!(
        expression_error(":contains(a b)"),
        "Expected a single string or ident for :contains(), got [<IDENT 'a' at 10>, <IDENT 'b' at 12>]"
    );
}

#[test]
fn test_pseudo_elements_ignored_unless_requested() {
    let translator = GenericTranslator::new();
    for pseudo_element in ["after", "before", "first-line", "first-letter"] {
        let selectors = parse(&format!("e:{pseudo_element}")).unwrap();
        assert_eq!(translator.selector_to_xpath(&selectors[0], "", false).unwrap(), "e");
    }

    let selectors = parse("e::foo").unwrap();
    assert_eq!(translator.selector_to_xpath(&selectors[0], "", false).unwrap(), "e");
    let error = translator.selector_to_xpath(&selectors[0], "", true).unwrap_err();
    assert!(error.is_expression());
}

#[test]
fn test_unicode() {
    assert_eq!(
        css_to_xpath(".a\u{c1}b"),
        "descendant-or-self::*[@class and contains(concat(' ', normalize-space(@class), ' '), ' a\u{c1}b ')]"
    );
}

#[test]
fn test_quoting() {
    assert_eq!(css_to_xpath("*[aval=\"'\"]"), "descendant-or-self::*[@aval = \"'\"]");
    assert_eq!(css_to_xpath("*[aval=\"'''\"]"), "descendant-or-self::*[@aval = \"'''\"]");
    assert_eq!(css_to_xpath("*[aval='\"']"), "descendant-or-self::*[@aval = '\"']");
    assert_eq!(css_to_xpath("*[aval='\"\"\"']"), "descendant-or-self::*[@aval = '\"\"\"']");
    assert_eq!(
        css_to_xpath(":scope > div[dataimg=\"<testmessage>\"]"),
        "descendant-or-self::*[1]/div[@dataimg = '<testmessage>']"
    );
}

#[test]
fn test_unicode_escapes() {
    // \22 == '"'  \20 == ' '
    assert_eq!(
        css_to_xpath(r#"*[aval="\'\22\'"]"#),
        r#"descendant-or-self::*[@aval = concat("'",'"',"'")]"#
    );
    assert_eq!(
        css_to_xpath(r#"*[aval="\'\22 2\'"]"#),
        r#"descendant-or-self::*[@aval = concat("'",'"2',"'")]"#
    );
    assert_eq!(
        css_to_xpath(r#"*[aval="\'\20  \'"]"#),
        r#"descendant-or-self::*[@aval = "'  '"]"#
    );
    assert_eq!(
        css_to_xpath("*[aval=\"'\\20\r\n '\"]"),
        r#"descendant-or-self::*[@aval = "'  '"]"#
    );
}

#[test]
fn test_options() {
    let translator = GenericTranslator::with_options(TranslatorOptions {
        lower_case_attribute_values: true,
        id_attribute: "xml:id".to_owned(),
        ..TranslatorOptions::default()
    });
    assert_eq!(translator.css_to_xpath("E#Main", "").unwrap(), "E[@xml:id = 'Main']");
    assert_eq!(translator.css_to_xpath("[A=B]", "").unwrap(), "*[@A = 'b']");
}
