/// Ancestor walk and template merge rules of the type tree builder
mod common;

use common::*;
use typetree_builder::{ChainOptions, TypeTreeError};
use typetree_error::AssemblyErrorKind;
use typetree_metadata::FieldTemplate;

fn categories(chain: &[FieldTemplate]) -> Vec<&str> {
    chain.iter().map(|t| t.category.as_str()).collect()
}

#[test]
fn test_foo_derives_from_mono_behaviour() {
    let hierarchy = Hierarchy::linear(&["Object", "Behaviour", "MonoBehaviour", "Foo"]);
    let catalog = engine_catalog();
    let declarations = Declarations::new().declare(
        "Foo",
        vec![
            FieldTemplate::new("float", "speed"),
            string_field("label"),
        ],
    );
    let builder = builder(&hierarchy, &catalog, &declarations);

    let chain = builder.build_template_chain(&ty("Foo")).unwrap();
    assert_eq!(chain.len(), 3);
    assert_eq!(chain[0], mono_behaviour_template());
    assert_eq!(chain[1].name, "speed");
    assert_eq!(chain[2].name, "label");

    let nodes = builder.build_type_tree(&ty("Foo")).unwrap();
    let engine_nodes = mono_behaviour_template().node_count();
    assert_eq!(nodes[0].type_name, "MonoBehaviour");
    assert_eq!(nodes[0].level, 0);
    assert!(nodes[1..engine_nodes].iter().all(|n| n.level >= 1));

    let own: Vec<_> = nodes[engine_nodes..]
        .iter()
        .map(|n| (n.name.as_str(), n.level))
        .collect();
    assert_eq!(
        own,
        [("speed", 1), ("label", 1), ("Array", 2), ("size", 3), ("data", 3)]
    );
}

#[test]
fn test_bar_without_engine_ancestor_is_unsupported() {
    let hierarchy = Hierarchy::new().derive("Bar", "Object");
    let catalog = engine_catalog();
    let declarations = Declarations::new().declare("Bar", vec![FieldTemplate::new("int", "x")]);
    let builder = builder(&hierarchy, &catalog, &declarations);

    assert!(builder.build_template_chain(&ty("Bar")).unwrap().is_empty());
    assert!(builder.build_type_tree(&ty("Bar")).unwrap().is_empty());
    assert!(
        declarations.calls().is_empty(),
        "declared fields of an unsupported type should not be generated"
    );
}

#[test]
fn test_type_without_base_is_unsupported() {
    let hierarchy = Hierarchy::new();
    let catalog = engine_catalog();
    let declarations = Declarations::new();
    let builder = builder(&hierarchy, &catalog, &declarations);

    assert!(builder.build_template_chain(&ty("Lonely")).unwrap().is_empty());
    assert!(catalog.queries().is_empty());
}

#[test]
fn test_stop_rule_never_queries_past_mono_behaviour() {
    let hierarchy = Hierarchy::linear(&["Object", "MonoBehaviour", "SomeMiddleClass", "MyScript"]);
    let catalog = RecordingCatalog::new()
        .with_class(object_template())
        .with_class(mono_behaviour_template())
        .with_named_class("SomeMiddleClass", FieldTemplate::new("Transform", "Base"));
    let declarations = Declarations::new();
    let builder = builder(&hierarchy, &catalog, &declarations);

    let chain = builder.build_template_chain(&ty("MyScript")).unwrap();
    assert_eq!(categories(&chain), ["Object", "MonoBehaviour"]);
    assert_eq!(catalog.queries(), ["Object", "MonoBehaviour"]);

    let nodes = typetree_builder::flatten(&chain);
    assert_eq!(nodes[0].name, "Base");
    assert_eq!(nodes[0].level, 0);
    assert_eq!(nodes[1].type_name, "MonoBehaviour");
    assert_eq!(nodes[1].level, 1);
}

#[test]
fn test_stop_rule_for_scriptable_object() {
    let hierarchy =
        Hierarchy::linear(&["Object", "ScriptableObject", "Settings", "GameSettings"]);
    let catalog = engine_catalog().with_named_class("Settings", FieldTemplate::new("Settings", "Base"));
    let declarations = Declarations::new()
        .declare("GameSettings", vec![FieldTemplate::new("int", "quality")]);
    let builder = builder(&hierarchy, &catalog, &declarations);

    let chain = builder.build_template_chain(&ty("GameSettings")).unwrap();
    assert_eq!(categories(&chain), ["ScriptableObject", "int"]);
    assert_eq!(catalog.queries(), ["Object", "ScriptableObject"]);
}

#[test]
fn test_full_walk_queries_every_ancestor() {
    let hierarchy = Hierarchy::linear(&["Object", "MonoBehaviour", "SomeMiddleClass", "MyScript"]);
    let catalog = RecordingCatalog::new()
        .with_class(object_template())
        .with_class(mono_behaviour_template())
        .with_named_class("SomeMiddleClass", FieldTemplate::new("Transform", "Base"));
    let declarations = Declarations::new();
    let builder =
        builder(&hierarchy, &catalog, &declarations).with_options(ChainOptions::full_walk());

    let chain = builder.build_template_chain(&ty("MyScript")).unwrap();
    assert_eq!(categories(&chain), ["Object", "MonoBehaviour", "Transform"]);
    assert_eq!(
        catalog.queries(),
        ["Object", "MonoBehaviour", "SomeMiddleClass"]
    );
}

#[test]
fn test_component_ancestors_are_skipped() {
    let hierarchy = Hierarchy::linear(&["Object", "Component", "Renderer", "MeshRenderer"]);
    let catalog = RecordingCatalog::new()
        .with_class(object_template())
        .with_named_class("Component", component_template())
        .with_class(FieldTemplate::new("Renderer", "Base").with_child(
            FieldTemplate::new("UInt8", "m_Enabled").aligned(),
        ));
    let declarations = Declarations::new();
    let builder = builder(&hierarchy, &catalog, &declarations);

    let chain = builder.build_template_chain(&ty("MeshRenderer")).unwrap();
    assert_eq!(categories(&chain), ["Object", "Renderer"]);
    assert_eq!(catalog.queries(), ["Object", "Component", "Renderer"]);
}

#[test]
fn test_component_alone_is_unsupported() {
    let hierarchy = Hierarchy::linear(&["Component", "Behaviour", "Custom"]);
    let catalog = engine_catalog();
    let declarations = Declarations::new().declare("Custom", vec![FieldTemplate::new("int", "x")]);
    let builder = builder(&hierarchy, &catalog, &declarations);

    assert!(builder.build_template_chain(&ty("Custom")).unwrap().is_empty());
}

#[test]
fn test_ancestor_chain_runs_root_first() {
    let hierarchy = Hierarchy::linear(&["Object", "Component", "Behaviour", "MonoBehaviour", "Foo"]);
    let catalog = engine_catalog();
    let declarations = Declarations::new();
    let builder = builder(&hierarchy, &catalog, &declarations);

    let names: Vec<_> = builder
        .ancestor_chain(&ty("Foo"))
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(names, ["Object", "Component", "Behaviour", "MonoBehaviour"]);
}

#[test]
fn test_circular_inheritance_is_an_error() {
    let hierarchy = Hierarchy::new().derive("A", "B").derive("B", "C").derive("C", "A");
    let catalog = engine_catalog();
    let declarations = Declarations::new();
    let builder = builder(&hierarchy, &catalog, &declarations);

    let err = builder.build_template_chain(&ty("A")).unwrap_err();
    assert!(matches!(
        err,
        TypeTreeError::Assembly {
            kind: AssemblyErrorKind::CircularInheritance,
            ..
        }
    ));
    assert_eq!(err.type_name(), Some("A"));
}

#[test]
fn test_lookup_errors_propagate_unchanged() {
    let hierarchy = Hierarchy::linear(&["MonoBehaviour", "Unreflectable"]);
    let catalog = engine_catalog();
    let declarations = Declarations::new();
    let builder = builder(&hierarchy, &catalog, &declarations);

    let err = builder.build_template_chain(&ty("Unreflectable")).unwrap_err();
    assert!(err.is_reflection());
    assert_eq!(err.type_name(), Some("Unreflectable"));

    let err = builder.build_template_chain(&ty("Broken")).unwrap_err();
    assert!(matches!(
        err,
        TypeTreeError::Assembly {
            kind: AssemblyErrorKind::UnresolvedType,
            ..
        }
    ));
}
