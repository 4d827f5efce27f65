use super::*;

#[test]
fn static_mapper_resolves_builtin_kinds_test() {
    let mapper = StaticMapper::new();

    let mapping = mapper.rest_mapping(&GroupKind::new("apps", "Deployment")).unwrap();
    assert_eq!("apps/v1", mapping.resource.api_version);
    assert_eq!("deployments", mapping.resource.plural);
    assert_eq!(Scope::Namespaced, mapping.scope);

    let mapping = mapper.rest_mapping(&GroupKind::core("Namespace")).unwrap();
    assert_eq!("v1", mapping.resource.api_version);
    assert_eq!(Scope::Cluster, mapping.scope);
}

#[test]
fn static_mapper_unknown_kind_test() {
    let mapper = StaticMapper::new();
    let error = mapper.rest_mapping(&GroupKind::new("example.com", "Widget")).unwrap_err();

    assert_eq!("no mapping found for Widget.example.com", error.to_string());
}

#[test]
fn static_mapper_insert_test() {
    let mut mapper = StaticMapper::new();
    mapper.insert("example.com", "v1alpha1", "Widget", "widgets", Scope::Namespaced);

    let mapping = mapper.rest_mapping(&GroupKind::new("example.com", "Widget")).unwrap();
    assert_eq!("example.com/v1alpha1", mapping.resource.api_version);
    assert_eq!(GroupKind::new("example.com", "Widget"), mapping.group_kind());
}
