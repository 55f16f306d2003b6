//! Integration tests for document queries: candidate lookup by id, tag,
//! class, and attribute, and ancestor verification across combinators.

use jargon_common::warning::was_warned;
use jargon_dom::{DomTree, FixtureNode, NodeId, label};
use jargon_select::{
    Collection, Matches, Selector, SelectorError, Step, Strategy, WARNING_COMPONENT, locator, query,
    query_within, rejection_message,
};

/// `div#root > div.foo > p.bar#unique`, an `a[href="x.html"]` next to the
/// paragraph, and an unrelated `p.bar` directly under `div#root`.
struct Scenario {
    tree: DomTree,
    root: NodeId,
    foo: NodeId,
    unique: NodeId,
    link: NodeId,
    other_bar: NodeId,
}

fn scenario() -> Scenario {
    let mut tree = DomTree::new();
    let root = tree.append_element(NodeId::ROOT, "div", &[("id", "root")]);
    let foo = tree.append_element(root, "div", &[("class", "foo")]);
    let unique = tree.append_element(foo, "p", &[("class", "bar"), ("id", "unique")]);
    let link = tree.append_element(foo, "a", &[("href", "x.html")]);
    let other_bar = tree.append_element(root, "p", &[("class", "bar")]);
    Scenario {
        tree,
        root,
        foo,
        unique,
        link,
        other_bar,
    }
}

/// A deeper page:
///
/// ```text
/// div#tutu.fuu.bar
///   div#blob.bar
///     div.fuzz[bar=baz]
///       div.bar.jargon[data-jargon=fuzz/inputs/fuzz.jpg]
///         span
///           code.bar[data-jargon=x] "code"
///     p#unique
///   img.jargon[src=foo.jpg]
/// p#unique.bunk
/// strong.bar.bunk[data-jargon=fuzz/inputs/fuzz.jpg]
/// ```
fn page() -> DomTree {
    let nodes: Vec<FixtureNode> = serde_json::from_str(
        r#"[
        {"tag": "div", "attrs": {"id": "tutu", "class": "fuu bar"}, "children": [
            {"tag": "div", "attrs": {"id": "blob", "class": "bar"}, "children": [
                {"tag": "div", "attrs": {"class": "fuzz", "bar": "baz"}, "children": [
                    {"tag": "div", "attrs": {"class": "bar jargon", "data-jargon": "fuzz/inputs/fuzz.jpg"}, "children": [
                        {"tag": "span", "children": [
                            {"tag": "code", "attrs": {"class": "bar", "data-jargon": "x"}, "children": ["code"]}
                        ]}
                    ]}
                ]},
                {"tag": "p", "attrs": {"id": "unique"}}
            ]},
            {"tag": "img", "attrs": {"class": "jargon", "src": "foo.jpg"}}
        ]},
        {"tag": "p", "attrs": {"id": "unique", "class": "bunk"}},
        {"tag": "strong", "attrs": {"class": "bar bunk", "data-jargon": "fuzz/inputs/fuzz.jpg"}}
    ]"#,
    )
    .unwrap();
    DomTree::from_fixture(&nodes)
}

fn labels(collection: &Collection<'_>) -> Vec<String> {
    collection
        .iter()
        .map(|node| label(collection.tree(), node))
        .collect()
}

// ========== reference scenarios ==========

#[test]
fn test_query_by_id() {
    let s = scenario();
    let found = query(&s.tree, "#unique");
    assert_eq!(found.len(), 1);
    assert_eq!(found.nodes(), &[s.unique]);
}

#[test]
fn test_query_direct_child() {
    let s = scenario();
    assert_eq!(query(&s.tree, "div.foo > p.bar").nodes(), &[s.unique]);
    assert!(query(&s.tree, "div.foo > span.bar").is_empty());
}

#[test]
fn test_query_descendant_regardless_of_tag() {
    let s = scenario();
    assert_eq!(query(&s.tree, "div .bar").nodes(), &[s.unique, s.other_bar]);
}

#[test]
fn test_query_attribute_value() {
    let s = scenario();
    assert_eq!(query(&s.tree, r#"a[href="x.html"]"#).nodes(), &[s.link]);
    assert!(query(&s.tree, r#"a[href="y.html"]"#).is_empty());
}

#[test]
fn test_has_class_on_single_element_is_a_bool() {
    let s = scenario();
    assert_eq!(
        query(&s.tree, "div.foo > p.bar").has_class("bar"),
        Matches::Single(true)
    );
}

#[test]
fn test_has_class_on_many_elements_is_a_list() {
    let s = scenario();
    assert_eq!(
        query(&s.tree, "p.bar").has_class("bar"),
        Matches::Many(vec![true, true])
    );
}

// ========== candidate lookup ==========

#[test]
fn test_query_tag_returns_tree_order() {
    let s = scenario();
    assert_eq!(query(&s.tree, "div").nodes(), &[s.root, s.foo]);
    assert_eq!(query(&s.tree, "p").nodes(), &[s.unique, s.other_bar]);
}

#[test]
fn test_query_tag_is_case_insensitive() {
    let s = scenario();
    assert_eq!(query(&s.tree, "DIV.foo > P").nodes(), &[s.unique]);
}

#[test]
fn test_query_star_returns_every_element() {
    let s = scenario();
    assert_eq!(query(&s.tree, "*").len(), 5);
    assert_eq!(query(&s.tree, "div.foo > *").nodes(), &[s.unique, s.link]);
}

#[test]
fn test_star_step_matches_any_element() {
    let s = scenario();
    let children = query(&s.tree, "div.foo > *");
    assert_eq!(children.has_selector("div.foo > *"), Matches::Many(vec![true, true]));

    let star = Step::parse("*").unwrap();
    assert!(star.matches(&s.tree, s.root));
    assert!(!star.matches(&s.tree, NodeId::ROOT));

    assert_eq!(query(&s.tree, "* > p.bar").nodes(), &[s.unique, s.other_bar]);
    assert_eq!(query(&s.tree, "*[href]").nodes(), &[s.link]);
    assert_eq!(query(&s.tree, "*.foo").nodes(), &[s.foo]);
}

#[test]
fn test_query_duplicate_ids_return_first_only() {
    let tree = page();
    let found = query(&tree, "#unique");
    assert_eq!(labels(&found), vec!["p#unique"]);
}

#[test]
fn test_query_class_matches_whole_tokens() {
    let tree = page();
    assert_eq!(query(&tree, ".bar").len(), 5);
    assert!(query(&tree, ".ba").is_empty());
    assert_eq!(labels(&query(&tree, "strong.bar")), vec![
        r#"strong.bar.bunk[data-jargon="fuzz/inputs/fuzz.jpg"]"#
    ]);
}

#[test]
fn test_query_attribute_on_tag_and_class() {
    let tree = page();
    assert_eq!(labels(&query(&tree, "code[data-jargon]")), vec![
        r#"code.bar[data-jargon="x"]"#
    ]);
    assert_eq!(query(&tree, r#".bar[data-jargon="fuzz/inputs/fuzz.jpg"]"#).len(), 2);
    assert_eq!(query(&tree, ".bar[data-jargon]").len(), 3);
    assert_eq!(labels(&query(&tree, r#"img[src="foo.jpg"]"#)), vec![
        r#"img.jargon[src="foo.jpg"]"#
    ]);
}

#[test]
fn test_query_unqualified_attribute() {
    let tree = page();
    assert_eq!(labels(&query(&tree, "[bar]")), vec![r#"div.fuzz[bar="baz"]"#]);
    assert_eq!(query(&tree, "[data-jargon]").len(), 3);
}

#[test]
fn test_attribute_presence_and_empty_value() {
    let mut tree = DomTree::new();
    let empty = tree.append_element(NodeId::ROOT, "img", &[("alt", "")]);
    let filled = tree.append_element(NodeId::ROOT, "img", &[("alt", "logo")]);
    let _missing = tree.append_element(NodeId::ROOT, "img", &[]);

    assert_eq!(query(&tree, "img[alt]").nodes(), &[empty, filled]);
    assert_eq!(query(&tree, r#"img[alt=""]"#).nodes(), &[empty]);
    assert_eq!(query(&tree, "img[alt=logo]").nodes(), &[filled]);
}

#[test]
fn test_attribute_value_with_spaces() {
    let mut tree = DomTree::new();
    let a = tree.append_element(NodeId::ROOT, "a", &[("title", "hello big world")]);

    assert_eq!(query(&tree, r#"a[title="hello big world"]"#).nodes(), &[a]);
    assert!(query(&tree, r#"a[title="hello"]"#).is_empty());
}

#[test]
fn test_strategy_follows_the_rightmost_step() {
    for (selector, expected) in [
        ("div #x", Strategy::Id),
        ("div a[href]", Strategy::Attribute),
        (".x[href]", Strategy::Attribute),
        ("a > p.bar", Strategy::Class),
        (".bar", Strategy::Class),
        (".bar p", Strategy::Tag),
    ] {
        let parsed = Selector::parse(selector).unwrap();
        assert_eq!(Strategy::of(parsed.subject()), expected, "{selector}");
    }
    assert_eq!(Strategy::Attribute.to_string(), "attribute");
}

#[test]
fn test_locate_ignores_the_scope_itself() {
    let s = scenario();
    let step = Selector::parse("div").unwrap();
    assert_eq!(locator::locate(&s.tree, s.root, step.subject()), vec![s.foo]);
}

// ========== ancestor walk ==========

#[test]
fn test_child_requires_the_immediate_parent() {
    let tree = page();
    assert_eq!(labels(&query(&tree, "span > code")), vec![r#"code.bar[data-jargon="x"]"#]);
    assert!(query(&tree, "div > code").is_empty());
    assert_eq!(query(&tree, "div code").len(), 1);
}

#[test]
fn test_id_chains() {
    let tree = page();
    assert_eq!(query(&tree, "#tutu #blob > #unique").len(), 1);
    assert_eq!(query(&tree, "#tutu #blob #unique").len(), 1);
    assert_eq!(query(&tree, "#tutu > #blob > #unique").len(), 1);
    assert!(query(&tree, "#bar #blob > #unique").is_empty());
    assert!(query(&tree, "#blob > #tutu #unique").is_empty());
}

#[test]
fn test_class_chains() {
    let tree = page();
    assert_eq!(labels(&query(&tree, "div.bar > .bar")), vec!["div#blob.bar"]);
    assert_eq!(query(&tree, ".fuu .bar").len(), 3);
    assert!(query(&tree, ".fuu div.bar > .jargon").is_empty());
    assert_eq!(labels(&query(&tree, "div.bar > .jargon")), vec![
        r#"img.jargon[src="foo.jpg"]"#
    ]);
}

#[test]
fn test_long_mixed_chain() {
    let tree = page();
    let found = query(&tree, r#"div.bar #blob div[bar="baz"] > div[data-jargon]"#);
    assert_eq!(labels(&found), vec![
        r#"div.bar.jargon[data-jargon="fuzz/inputs/fuzz.jpg"]"#
    ]);
    assert!(
        query(&tree, r#".bar > .fuu span > .bar[data-jargon="fuzz/inputs/fuzz.jpg"]"#).is_empty()
    );
}

#[test]
fn test_descendant_skips_any_number_of_ancestors() {
    let mut tree = DomTree::new();
    let a = tree.append_element(NodeId::ROOT, "section", &[("class", "a")]);
    let mut parent = a;
    for _ in 0..5 {
        parent = tree.append_element(parent, "div", &[]);
    }
    let b = tree.append_element(parent, "span", &[("class", "b")]);

    assert_eq!(query(&tree, ".a .b").nodes(), &[b]);
    assert!(query(&tree, ".a > .b").is_empty());
}

#[test]
fn test_child_combinator_does_not_backtrack() {
    // div.a > div.b > div.b > span: the nearest div.b is consumed for the
    // descendant step, and its parent is then the only chance for div.a.
    let mut tree = DomTree::new();
    let a = tree.append_element(NodeId::ROOT, "div", &[("class", "a")]);
    let outer_b = tree.append_element(a, "div", &[("class", "b")]);
    let inner_b = tree.append_element(outer_b, "div", &[("class", "b")]);
    let span = tree.append_element(inner_b, "span", &[]);

    assert!(query(&tree, "div.a > div.b span").is_empty());
    assert_eq!(query(&tree, "div.a > div.b > div.b > span").nodes(), &[span]);
    assert_eq!(query(&tree, "div.a div.b span").nodes(), &[span]);
}

#[test]
fn test_root_reached_fails_the_candidate() {
    let s = scenario();
    assert!(query(&s.tree, "section p").is_empty());
    // The top-level div has only the Document above it
    assert!(query(&s.tree, "div #root").is_empty());
}

#[test]
fn test_extra_ancestors_above_the_chain_are_ignored() {
    let s = scenario();
    assert_eq!(query(&s.tree, "div.foo > a").nodes(), &[s.link]);
    assert_eq!(query(&s.tree, "#root a").nodes(), &[s.link]);
}

#[test]
fn test_text_nodes_are_never_candidates() {
    let tree = page();
    // "code" is both a tag and the text of a text node
    assert_eq!(query(&tree, "code").len(), 1);
    assert_eq!(query(&tree, "span > *").len(), 1);
}

// ========== scoped queries ==========

#[test]
fn test_query_within_searches_descendants_only() {
    let tree = page();
    let blob = query(&tree, "#blob").first().unwrap();

    assert!(query_within(&tree, blob, "#tutu").is_empty());
    assert!(query_within(&tree, blob, "#blob").is_empty());
    assert_eq!(query_within(&tree, blob, ".bar").len(), 2);
}

#[test]
fn test_query_within_verifies_ancestors_above_the_scope() {
    let tree = page();
    let fuzz = query(&tree, ".fuzz").first().unwrap();

    assert_eq!(labels(&query_within(&tree, fuzz, "#tutu span")), vec!["span"]);
}

// ========== malformed selectors ==========

#[test]
fn test_malformed_selector_yields_empty_and_warns() {
    let s = scenario();
    for (selector, err) in [
        ("", SelectorError::Empty),
        ("div >", SelectorError::TrailingCombinator),
        ("a[href", SelectorError::UnterminatedAttribute("a[href".to_string())),
        ("p.a.b", SelectorError::MultipleClasses("p.a.b".to_string())),
    ] {
        assert!(query(&s.tree, selector).is_empty(), "{selector:?}");
        assert!(
            was_warned(WARNING_COMPONENT, &rejection_message(selector, &err)),
            "{selector:?}"
        );
    }
}

// ========== properties on a fixed tree ==========

#[test]
fn test_query_is_deterministic() {
    let tree = page();
    for selector in [".bar", "div .bar", "#tutu > #blob", "[data-jargon]", "div > div.bar"] {
        assert_eq!(query(&tree, selector).nodes(), query(&tree, selector).nodes());
    }
}

#[test]
fn test_every_result_matches_the_selector() {
    let tree = page();
    for selector in [".bar", ".fuu .bar", "div > div", "#blob [data-jargon]"] {
        let found = query(&tree, selector);
        assert!(!found.is_empty(), "{selector}");
        assert!(found.has_selector(selector).all(), "{selector}");
    }
}
