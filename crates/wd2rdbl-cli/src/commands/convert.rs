//! Convert command implementation.

use crate::cli::ConvertArgs;
use crate::config::Config;
use crate::error::Result;
use crate::source::{http_client, Source};
use serde_json::{json, Map, Value};
use std::io::Write;
use wd2rdbl_domain::namespace::keyword;
use wd2rdbl_mapper::Mapper;

use super::load_mapper;

/// Execute the convert command.
pub async fn execute_convert(args: ConvertArgs, config: &Config) -> Result<()> {
    let mapper = load_mapper(&config.vocabulary)?;

    let sources: Vec<Source> = if args.sources.is_empty() {
        vec![Source::Stdin]
    } else {
        args.sources.iter().map(|arg| Source::parse(arg)).collect()
    };

    let client = http_client()?;
    let document = convert_sources(&mapper, &client, &sources).await?;

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &document)?;
    writeln!(stdout)?;

    Ok(())
}

/// Load and map each source.
///
/// One source yields its `{@context, @graph}` document. Several yield a
/// dataset with one named graph per source, identified by the source.
pub async fn convert_sources(
    mapper: &Mapper,
    client: &reqwest::Client,
    sources: &[Source],
) -> Result<Value> {
    let mut documents = Vec::with_capacity(sources.len());
    for source in sources {
        tracing::info!("Converting {}", source);
        let data = source.load(client).await?;
        let document = serde_json::to_value(mapper.to_graph(&data)?)?;
        documents.push((source.to_string(), document));
    }

    if let [(_, document)] = documents.as_mut_slice() {
        return Ok(document.take());
    }

    let graphs: Vec<Value> = documents
        .into_iter()
        .map(|(id, mut document)| {
            let graph = document
                .get_mut(keyword::GRAPH)
                .map(Value::take)
                .unwrap_or_else(|| json!([]));
            json!({ keyword::ID: id, keyword::GRAPH: graph })
        })
        .collect();

    let mut dataset = Map::new();
    dataset.insert(
        keyword::CONTEXT.to_string(),
        serde_json::to_value(mapper.vocab().context())?,
    );
    dataset.insert(keyword::GRAPH.to_string(), Value::Array(graphs));
    Ok(Value::Object(dataset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use wd2rdbl_mapper::VocabularyIndex;

    fn mapper() -> Mapper {
        Mapper::new(VocabularyIndex::build(&json!({"terms": {"wd:Q5": {"matches": "Human"}}})).unwrap())
    }

    fn write_entity(dir: &Path, id: &str) -> Source {
        let path = dir.join(format!("{}.json", id));
        std::fs::write(
            &path,
            json!({"entities": {id: {"id": id, "type": "item"}}}).to_string(),
        )
        .unwrap();
        Source::File(path)
    }

    #[tokio::test]
    async fn test_single_source_document() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_entity(dir.path(), "Q1");

        let document = convert_sources(&mapper(), &http_client().unwrap(), &[source])
            .await
            .unwrap();

        let keys: Vec<&str> = document.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["@context", "@graph"]);
        assert_eq!(document["@graph"][0]["@id"], "http://www.wikidata.org/entity/Q1");
    }

    #[tokio::test]
    async fn test_multiple_sources_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_entity(dir.path(), "Q1");
        let second = write_entity(dir.path(), "Q2");
        let names = [first.to_string(), second.to_string()];

        let document = convert_sources(&mapper(), &http_client().unwrap(), &[first, second])
            .await
            .unwrap();

        assert_eq!(document["@context"]["sdo"], "https://schema.org/");
        let graphs = document["@graph"].as_array().unwrap();
        assert_eq!(graphs.len(), 2);
        assert_eq!(graphs[0]["@id"], names[0].as_str());
        assert_eq!(graphs[1]["@id"], names[1].as_str());
        assert_eq!(graphs[1]["@graph"][0]["@id"], "http://www.wikidata.org/entity/Q2");
    }

    #[tokio::test]
    async fn test_unreadable_source_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").unwrap();

        let result = convert_sources(&mapper(), &http_client().unwrap(), &[Source::File(path)]).await;
        assert!(matches!(result, Err(crate::CliError::Serialization(_))));
    }
}
