use cmdpath_core::{
    Argument, CaseSensitivity, Command, CommandMap, LookupResult, Resolver, ResolverOptions,
};

const DEFINITIONS: &str = r#"
[foo]
aliases = ["fizz"]
arguments = [{ name = "val", required = true }]

[bar]
aliases = ["baa"]
arguments = []
"#;

fn resolver() -> Resolver {
    Resolver::from_toml_str(DEFINITIONS, ResolverOptions::default())
        .expect("definitions should build")
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn parse_binds_positional_argument() {
    let resolver = resolver();
    let result = resolver.parse("foo 123").expect("path is not empty");

    let LookupResult::Success { name, command, arguments, path_used, path_dangling } = result else {
        panic!("expected success");
    };
    assert_eq!(name, "foo");
    assert_eq!(command, resolver.get_command("foo").expect("foo is registered"));
    assert_eq!(arguments.get("val"), Some("123"));
    assert_eq!(path_used, strings(&["foo"]));
    assert_eq!(path_dangling, strings(&["123"]));
}

#[test]
fn parse_through_alias_reports_canonical_name() {
    let resolver = resolver();
    let result = resolver.parse("fizz 9").expect("path is not empty");
    assert_eq!(result.command().map(|(name, _)| name), Some("foo"));
    assert_eq!(result.path_used(), strings(&["fizz"]));
}

#[test]
fn parse_unknown_command_suggests_similar() {
    let resolver = resolver();
    let result = resolver.parse("foob").expect("path is not empty");
    assert_eq!(
        result,
        LookupResult::NotFound {
            missing: "foob".into(),
            similar: strings(&["foo"]),
            path_used: strings(&["foob"]),
            path_dangling: vec![],
        }
    );
}

#[test]
fn parse_without_required_argument_reports_it() {
    let resolver = resolver();
    let result = resolver.parse("foo").expect("path is not empty");
    let LookupResult::MissingArguments { name, missing, .. } = result else {
        panic!("expected missing arguments");
    };
    assert_eq!(name, "foo");
    assert_eq!(missing, vec![Argument::required("val")]);
}

#[test]
fn command_without_arguments_always_succeeds() {
    let resolver = resolver();
    let result = resolver.parse("baa anything").expect("path is not empty");
    assert!(result.is_success());
    assert_eq!(result.command().map(|(name, _)| name), Some("bar"));
    assert_eq!(result.path_dangling(), strings(&["anything"]));
}

#[test]
fn case_policy_follows_options() {
    let sensitive = resolver();
    assert!(matches!(sensitive.parse("FoO 1"), Ok(LookupResult::NotFound { .. })));

    let options = ResolverOptions { case_sensitive: false, ..Default::default() };
    let insensitive =
        Resolver::from_toml_str(DEFINITIONS, options).expect("definitions should build");
    assert!(insensitive.parse("FoO 1").expect("path is not empty").is_success());
    assert!(insensitive.parse("BAA").expect("path is not empty").is_success());
}

#[test]
fn programmatic_and_declarative_trees_agree() {
    let built = CommandMap::new()
        .with_command(
            "foo",
            Command::builder().alias("fizz").argument(Argument::required("val")).build(),
        )
        .and_then(|map| map.with_command("bar", Command::builder().alias("baa").build()))
        .expect("programmatic tree should build");

    let declared = resolver();
    assert_eq!(
        built.keys().collect::<Vec<_>>(),
        declared.commands().keys().collect::<Vec<_>>()
    );
    for key in ["foo", "fizz", "bar", "baa"] {
        let ours = built.get(key, CaseSensitivity::Sensitive).expect("key is registered");
        let theirs = declared.get_command(key).expect("key is registered");
        assert_eq!(ours.aliases(), theirs.aliases());
        assert_eq!(ours.arguments(), theirs.arguments());
    }
}

#[test]
fn nested_definitions_resolve_sub_commands() {
    let source = r#"
[remote]
arguments = [{ name = "name", required = false }]

[remote.subcommands.add]
arguments = [{ name = "name" }, { name = "url" }]

[remote.subcommands.remove]
aliases = ["rm"]
arguments = [{ name = "name" }]
"#;
    let resolver = Resolver::from_toml_str(source, ResolverOptions::default())
        .expect("definitions should build");

    let result = resolver.parse("remote add origin").expect("path is not empty");
    let LookupResult::MissingArguments { name, missing, path_used, .. } = result else {
        panic!("expected missing arguments");
    };
    assert_eq!(name, "add");
    assert_eq!(missing, vec![Argument::required("url")]);
    assert_eq!(path_used, strings(&["remote", "add"]));

    let result = resolver.parse("remote rm origin").expect("path is not empty");
    assert_eq!(result.command().map(|(name, _)| name), Some("remove"));

    // Not a sub-command: becomes the parent's argument.
    let result = resolver.parse("remote origin").expect("path is not empty");
    assert_eq!(result.command().map(|(name, _)| name), Some("remote"));
    assert_eq!(result.arguments().and_then(|args| args.get("name")), Some("origin"));
}
