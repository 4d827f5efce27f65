use super::*;

#[test]
fn group_kind_display_test() {
    assert_eq!("Pod", GroupKind::core("Pod").to_string());
    assert_eq!("Deployment.apps", GroupKind::new("apps", "Deployment").to_string());
}

#[test]
fn lookup_namespace_test() {
    let id = ResourceIdentifier::new(GroupKind::new("apps", "Deployment"), "test", "foo");
    assert_eq!("test", id.lookup_namespace());

    let id = ResourceIdentifier::cluster_scoped(GroupKind::core("Namespace"), "foo");
    assert_eq!("default", id.lookup_namespace());
}

#[test]
fn ordering_test() {
    let mut identifiers = vec![
        ResourceIdentifier::new(GroupKind::new("apps", "Deployment"), "ns-b", "foo"),
        ResourceIdentifier::new(GroupKind::core("Pod"), "ns-a", "zzz"),
        ResourceIdentifier::new(GroupKind::new("apps", "ReplicaSet"), "ns-a", "bar"),
        ResourceIdentifier::new(GroupKind::new("apps", "Deployment"), "ns-a", "bar"),
        ResourceIdentifier::new(GroupKind::new("apps", "Deployment"), "ns-a", "abc"),
    ];
    identifiers.sort();

    let formatted = identifiers.iter().map(ToString::to_string).collect::<Vec<_>>();
    assert_eq!(
        vec![
            "Pod ns-a/zzz",
            "Deployment.apps ns-a/abc",
            "Deployment.apps ns-a/bar",
            "ReplicaSet.apps ns-a/bar",
            "Deployment.apps ns-b/foo",
        ],
        formatted
    );
}
