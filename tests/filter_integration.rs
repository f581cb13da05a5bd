//! Startup pipeline tests — catalog build → filter → stats → validation,
//! exactly as the server bootstrap runs it.

use rabbitmq_mcp::tools::{
    catalog, check_tool_names, filter_stats, filter_tools, is_lite_tool, lite_tool_count,
    lite_tools, validate_filtered, Mode,
};

#[test]
fn full_mode_pipeline_registers_everything() {
    let catalog = catalog();
    let filtered = filter_tools(&catalog, Mode::Full);
    assert_eq!(filtered.len(), catalog.len());

    let stats = filter_stats(catalog.len(), filtered.len(), Mode::Full);
    assert_eq!(stats.mode, "full");
    assert_eq!(stats.filtered_out, 0);
    assert_eq!(stats.reduction_percentage, 0);

    let validation = validate_filtered(&filtered, Mode::Full);
    assert!(validation.is_valid);
}

#[test]
fn lite_mode_pipeline_reduces_to_the_allow_list() {
    let catalog = catalog();
    let filtered = filter_tools(&catalog, Mode::Lite);

    // every allow-listed name exists in the catalog, so the subset is exact
    assert_eq!(filtered.len(), lite_tool_count());
    assert!(filtered.iter().all(|t| is_lite_tool(t.name)));

    let stats = filter_stats(catalog.len(), filtered.len(), Mode::Lite);
    assert_eq!(stats.mode, "lite");
    assert_eq!(stats.original_count, 120);
    assert_eq!(stats.filtered_count, 18);
    assert_eq!(stats.filtered_out, 102);
    assert_eq!(stats.reduction_percentage, 85);

    let validation = validate_filtered(&filtered, Mode::Lite);
    assert!(validation.is_valid, "{}", validation.message);
    assert_eq!(validation.actual_count, Some(lite_tool_count()));
    assert_eq!(validation.expected_count, Some(lite_tool_count()));
}

#[test]
fn lite_subset_preserves_catalog_order() {
    let catalog = catalog();
    let filtered = filter_tools(&catalog, Mode::Lite);

    let positions: Vec<usize> = filtered
        .iter()
        .map(|tool| catalog.iter().position(|t| t.name == tool.name).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn custom_api_survives_both_modes() {
    let catalog = catalog();
    for mode in [Mode::Full, Mode::Lite] {
        let filtered = filter_tools(&catalog, mode);
        assert!(
            filtered.iter().any(|t| t.name == "rabbitmq-custom-api"),
            "custom API tool missing in {mode:?}"
        );
    }
}

#[test]
fn registry_and_catalog_do_not_drift() {
    let catalog = catalog();
    let allow_list = lite_tools();
    let check = check_tool_names(&allow_list, &catalog);
    assert!(check.is_valid, "{}", check.message);
    assert!(check.missing.is_empty());
    // the full catalog is a strict superset of the allow-list
    assert_eq!(check.extra.len(), catalog.len() - allow_list.len());
}
