use design_patterns::catalog::{self, Category, Example, Pattern};
use design_patterns::config::CatalogConfig;
use design_patterns::PatternError;

#[test]
fn every_pattern_runs_both_examples() {
    let config = CatalogConfig::default();
    for pattern in Pattern::ALL {
        for example in [Example::Conceptual, Example::RealWorld] {
            let out = catalog::run(pattern, example, &config)
                .unwrap_or_else(|e| panic!("{} {:?} failed: {}", pattern, example, e));
            assert!(!out.is_empty(), "{} {:?} produced no output", pattern, example);
        }
    }
}

#[test]
fn both_is_real_world_then_conceptual() {
    let config = CatalogConfig::default();
    let real = catalog::run(Pattern::Visitor, Example::RealWorld, &config).unwrap();
    let conceptual = catalog::run(Pattern::Visitor, Example::Conceptual, &config).unwrap();
    let both = catalog::run(Pattern::Visitor, Example::Both, &config).unwrap();

    let lines = both.as_slice();
    assert_eq!(&lines[..real.len()], real.as_slice());
    assert_eq!(&lines[lines.len() - conceptual.len()..], conceptual.as_slice());
}

#[test]
fn entries_cover_every_category() {
    let all = catalog::entries(None);
    assert_eq!(all.len(), Pattern::ALL.len());
    for category in [Category::Creational, Category::Structural, Category::Behavioral] {
        assert!(all.iter().any(|info| info.category == category));
    }
    assert!(all.iter().all(|info| !info.intent.is_empty()));
}

#[test]
fn entries_serialize_to_json() {
    let json = serde_json::to_value(catalog::entries(Some(Category::Creational))).unwrap();
    let slugs: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, ["abstract-factory", "builder", "prototype", "singleton"]);
}

#[test]
fn unknown_pattern_is_reported() {
    let err = "observr".parse::<Pattern>().unwrap_err();
    assert!(matches!(err, PatternError::UnknownPattern(name) if name == "observr"));
}

#[test]
fn config_reaches_the_demos() {
    let mut config = CatalogConfig::default();
    config.abstract_factory.os = "Mac".to_string();
    config.strategy.a = 10;
    config.strategy.b = 4;
    config.strategy.action = "subtraction".to_string();

    let gui = catalog::run(Pattern::AbstractFactory, Example::RealWorld, &config).unwrap();
    assert!(gui.contains("This is a Mac Button"));

    let calc = catalog::run(Pattern::Strategy, Example::RealWorld, &config).unwrap();
    assert!(calc.contains("Result: 6"));
}

/// Lines printed for the data source built from `[decorator]`.
fn configured_stack(config: &CatalogConfig) -> Vec<String> {
    let out = catalog::run(Pattern::Decorator, Example::RealWorld, config).unwrap();
    out.as_slice()
        .iter()
        .skip_while(|line| line.as_str() != "Configured data source:")
        .skip(1)
        .cloned()
        .collect()
}

#[test]
fn decorator_stack_follows_config() {
    let mut config = CatalogConfig::default();
    assert_eq!(
        configured_stack(&config),
        [
            "Compression(Encryption(File(salary.dat))) stores: Encrypted(Compressed(Salary records))",
            "Loaded salary data: Salary records",
        ]
    );

    config.decorator.encryption = false;
    config.decorator.compression = false;
    assert_eq!(
        configured_stack(&config),
        [
            "File(salary.dat) stores: Salary records",
            "Loaded salary data: Salary records",
        ]
    );

    config.decorator.compression = true;
    assert_eq!(
        configured_stack(&config)[0],
        "Compression(File(salary.dat)) stores: Compressed(Salary records)"
    );
}

#[test]
fn strategy_errors_surface_as_pattern_errors() {
    let mut config = CatalogConfig::default();
    config.strategy.a = i64::MAX;
    config.strategy.b = 2;
    let err = catalog::run(Pattern::Strategy, Example::RealWorld, &config).unwrap_err();
    assert!(matches!(err, PatternError::Calculator(_)));
}
