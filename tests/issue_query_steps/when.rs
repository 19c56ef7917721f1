//! When steps for issue query BDD scenarios.

use super::world::{QueryWorld, run_async};
use rstest_bdd_macros::when;
use taskbridge::connector::{adapters::memory::CollectingSink, domain::Query};

/// Splits `key=value;key=value` step text into query attributes.
fn attributes(text: &str) -> Vec<(String, String)> {
    text.split(';')
        .filter_map(|pair| pair.split_once('='))
        .map(|(key, value)| (key.to_owned(), value.to_owned()))
        .collect()
}

#[when(r#"the query "{pairs}" is run"#)]
fn run_query(world: &mut QueryWorld, pairs: String) -> Result<(), eyre::Report> {
    let config = world
        .config
        .clone()
        .ok_or_else(|| eyre::eyre!("missing repository configuration in scenario world"))?;
    let query = Query::from_attributes(attributes(&pairs));
    let mut sink = CollectingSink::new();

    let result = run_async(
        world
            .connector
            .run_query(&config, &query, &mut sink, &world.cancel),
    );
    world.received = sink.into_collected();
    world.last_result = Some(result);
    Ok(())
}
