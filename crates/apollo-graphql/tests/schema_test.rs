//! Whole-schema tests for the query surface.
//!
//! Each test executes a real GraphQL document against the built schema, with
//! both backends played by a wiremock server: the JSON store answers on its
//! collection paths, the SPARQL endpoint on `/`.

use std::time::Duration;

use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param, query_param_contains};
use wiremock::{Mock, MockServer, ResponseTemplate};

use apollo_core::connection::offset_to_cursor;
use apollo_core::GlobalId;
use apollo_datasource::{BackendConfig, Datasources};
use apollo_graphql::{build_schema, ApolloSchema};

fn schema_for(server: &MockServer) -> ApolloSchema {
    let config = BackendConfig {
        json_db_url: server.uri(),
        sparql_url: server.uri(),
        timeout: Duration::from_secs(5),
    };
    build_schema(Datasources::new(&config).unwrap())
}

fn global_id(type_name: &str, id: &str) -> String {
    GlobalId::new(type_name, id).encode()
}

async fn execute(schema: &ApolloSchema, query: &str) -> Value {
    let response = schema.execute(query).await;
    assert!(
        response.errors.is_empty(),
        "unexpected errors: {:?}",
        response.errors
    );
    response.data.into_json().unwrap()
}

async fn execute_err(schema: &ApolloSchema, query: &str) -> Value {
    let response = schema.execute(query).await;
    assert!(!response.errors.is_empty(), "expected errors, got none");
    serde_json::to_value(&response.errors[0]).unwrap()
}

#[tokio::test]
async fn test_concept_by_global_id_resolves_interface_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/concepts/123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "123",
            "_id": "http://data.example.com/apollo/concepts/123",
            "prefLabel_en": "Foo",
            "prefLabel_nl": "Foe",
            "notation": "F-1",
            "narrower": ["456"]
        })))
        .mount(&mock_server)
        .await;

    let schema = schema_for(&mock_server);
    let query = format!(
        r#"{{ concept(id: "{}") {{
            __typename id prefLabel dutch: prefLabel(language: NL) notation hasNarrower
        }} }}"#,
        global_id("Concept", "123")
    );
    let data = execute(&schema, &query).await;

    let concept = &data["concept"];
    assert_eq!(concept["__typename"], "Concept");
    assert_eq!(concept["id"], global_id("Concept", "123"));
    assert_eq!(concept["prefLabel"], "Foo");
    assert_eq!(concept["dutch"], "Foe");
    assert_eq!(concept["notation"], "F-1");
    assert_eq!(concept["hasNarrower"], true);
}

#[tokio::test]
async fn test_concept_lookup_by_raw_uri() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/concepts/123"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "123", "prefLabel_en": "Foo"})),
        )
        .mount(&mock_server)
        .await;

    let schema = schema_for(&mock_server);
    let data = execute(
        &schema,
        r#"{ concept(_id: "http://data.example.com/apollo/concepts/123") { prefLabel } }"#,
    )
    .await;
    assert_eq!(data["concept"]["prefLabel"], "Foo");
}

#[tokio::test]
async fn test_concept_lookup_needs_exactly_one_id_form() {
    let mock_server = MockServer::start().await;
    let schema = schema_for(&mock_server);

    let error = execute_err(
        &schema,
        &format!(
            r#"{{ concept(id: "{}", _id: "http://x/concepts/123") {{ prefLabel }} }}"#,
            global_id("Concept", "123")
        ),
    )
    .await;
    assert_eq!(error["extensions"]["code"], "INVALID_INPUT");

    let error = execute_err(&schema, "{ concept { prefLabel } }").await;
    assert_eq!(error["extensions"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_publication_concept_classifies_as_apollo_publication() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/concepts/hrlp-lippincott-procedures"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "hrlp-lippincott-procedures",
            "title_en": "Lippincott Procedures",
            "bibliographicResourceType":
                "http://data.wolterskluwer.com/apollo/resource/object-type/7c688f91-55e0-4a65-aec4-2185b30ef494"
        })))
        .mount(&mock_server)
        .await;

    let schema = schema_for(&mock_server);
    // The id was minted as a plain Concept; classification follows the record.
    let query = format!(
        r#"{{ concept(id: "{}") {{
            __typename
            ... on ApolloPublication {{ title }}
        }} }}"#,
        global_id("Concept", "hrlp-lippincott-procedures")
    );
    let data = execute(&schema, &query).await;

    assert_eq!(data["concept"]["__typename"], "ApolloPublication");
    assert_eq!(data["concept"]["title"], "Lippincott Procedures");
}

#[tokio::test]
async fn test_concepts_connection_threads_the_backend_total() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/concepts"))
        .and(query_param("inscheme_like", "/subjects$"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Total-Count", "9")
                .set_body_json(json!([
                    {"id": "1", "prefLabel_en": "Alpha"},
                    {"id": "2", "prefLabel_en": "Beta"}
                ])),
        )
        .mount(&mock_server)
        .await;

    let schema = schema_for(&mock_server);
    let query = format!(
        r#"{{ concepts(first: 1, filters: {{ conceptSchemeId: "{}" }}) {{
            totalCount
            pageInfo {{ hasNextPage endCursor }}
            edges {{ cursor node {{ prefLabel }} }}
        }} }}"#,
        global_id("ConceptScheme", "subjects")
    );
    let data = execute(&schema, &query).await;

    let connection = &data["concepts"];
    assert_eq!(connection["totalCount"], 9);
    assert_eq!(connection["pageInfo"]["hasNextPage"], true);
    assert_eq!(connection["edges"].as_array().unwrap().len(), 1);
    assert_eq!(connection["edges"][0]["node"]["prefLabel"], "Alpha");
    assert_eq!(connection["edges"][0]["cursor"], offset_to_cursor(0));

    // The end cursor pages past the first item on the next request.
    let query = format!(
        r#"{{ concepts(first: 1, after: "{}", filters: {{ conceptSchemeId: "{}" }}) {{
            edges {{ node {{ prefLabel }} }}
        }} }}"#,
        offset_to_cursor(0),
        global_id("ConceptScheme", "subjects")
    );
    let data = execute(&schema, &query).await;
    assert_eq!(data["concepts"]["edges"][0]["node"]["prefLabel"], "Beta");
}

#[tokio::test]
async fn test_concept_scheme_top_concepts_batch_one_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/conceptschemes/subjects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "subjects",
            "title_en": "Subjects",
            "topconcepts": ["a", "b"]
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/concepts"))
        .and(query_param("id", "a"))
        .and(query_param("id", "b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "a", "prefLabel_en": "Aorta"},
            {"id": "b", "prefLabel_en": "Brain"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let schema = schema_for(&mock_server);
    let query = format!(
        r#"{{ conceptScheme(id: "{}") {{
            title
            topConcepts {{ edges {{ node {{ prefLabel }} }} }}
        }} }}"#,
        global_id("ConceptScheme", "subjects")
    );
    let data = execute(&schema, &query).await;

    let scheme = &data["conceptScheme"];
    assert_eq!(scheme["title"], "Subjects");
    let edges = scheme["topConcepts"]["edges"].as_array().unwrap();
    assert_eq!(edges.len(), 2);
    assert_eq!(edges[0]["node"]["prefLabel"], "Aorta");
    assert_eq!(edges[1]["node"]["prefLabel"], "Brain");
}

#[tokio::test]
async fn test_search_concepts_keeps_label_order_and_count_total() {
    let mock_server = MockServer::start().await;

    // The windowed id query; the default concept type restricts to leaves.
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param_contains("query", "SELECT DISTINCT ?concept"))
        .and(query_param_contains(
            "query",
            "FILTER NOT EXISTS { ?concept skos:narrower",
        ))
        .and(query_param_contains("query", "STRSTARTS(?prefLabel, \"B\")"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": {"bindings": [
                {"concept": {"type": "uri", "value": "http://data.example.com/apollo/concepts/b"}},
                {"concept": {"type": "uri", "value": "http://data.example.com/apollo/concepts/a"}}
            ]}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    // The COUNT companion reports the unwindowed total.
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param_contains("query", "COUNT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": {"bindings": [{"total": {"type": "literal", "value": "7"}}]}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    // Hydration comes back in store order; the resolver restores label order.
    Mock::given(method("GET"))
        .and(path("/concepts"))
        .and(query_param("id", "b"))
        .and(query_param("id", "a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "a", "prefLabel_en": "Brain"},
            {"id": "b", "prefLabel_en": "Basal ganglia"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let schema = schema_for(&mock_server);
    let data = execute(
        &schema,
        r#"{ searchConcepts(filters: { prefLabelValue: { startsWith: "B" } }) {
            totalCount
            edges { node { prefLabel } }
        } }"#,
    )
    .await;

    let connection = &data["searchConcepts"];
    assert_eq!(connection["totalCount"], 7);
    let edges = connection["edges"].as_array().unwrap();
    assert_eq!(edges[0]["node"]["prefLabel"], "Basal ganglia");
    assert_eq!(edges[1]["node"]["prefLabel"], "Brain");
}

#[tokio::test]
async fn test_publications_listing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/concepts"))
        .and(query_param(
            "bibliographicResourceType_like",
            "/7c688f91-55e0-4a65-aec4-2185b30ef494$",
        ))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Total-Count", "3")
                .set_body_json(json!([{
                    "id": "wkbe-news",
                    "title_nl": "WKBE Nieuws",
                    "bibliographicResourceType":
                        "http://data.wolterskluwer.com/apollo/resource/object-type/7c688f91-55e0-4a65-aec4-2185b30ef494"
                }])),
        )
        .mount(&mock_server)
        .await;

    let schema = schema_for(&mock_server);
    let data = execute(
        &schema,
        "{ publications { totalCount edges { node { id title(language: NL) } } } }",
    )
    .await;

    let connection = &data["publications"];
    assert_eq!(connection["totalCount"], 3);
    let node = &connection["edges"][0]["node"];
    assert_eq!(node["id"], global_id("ApolloPublication", "wkbe-news"));
    assert_eq!(node["title"], "WKBE Nieuws");
}

#[tokio::test]
async fn test_hrlp_documents_filter_on_the_publication_slug() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/apollodocuments"))
        .and(query_param("inPublication", "hrlp-lippincott-procedures"))
        .and(query_param("_sort", "title_en"))
        .and(query_param("_order", "desc"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Total-Count", "1")
                .set_body_json(json!([{
                    "id": "doc-1",
                    "identifier": "HRLP-0001",
                    "title_en": "Wound care",
                    "inPublication": "hrlp-lippincott-procedures",
                    "about": ["c1"]
                }])),
        )
        .mount(&mock_server)
        .await;

    let schema = schema_for(&mock_server);
    let data = execute(
        &schema,
        r#"{ hrlpDocuments(orderBy: { title_en: DESC }) {
            edges { node { id identifier title } }
        } }"#,
    )
    .await;

    let node = &data["hrlpDocuments"]["edges"][0]["node"];
    assert_eq!(node["id"], global_id("HRLPDocument", "doc-1"));
    assert_eq!(node["identifier"], "HRLP-0001");
    assert_eq!(node["title"], "Wound care");
}

#[tokio::test]
async fn test_search_documents_expands_about_through_the_closure() {
    let mock_server = MockServer::start().await;

    // Closure walk: root fans out to two leaves, one level down.
    Mock::given(method("GET"))
        .and(path("/concepts"))
        .and(query_param("id", "root"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "root", "narrower": ["l1", "l2"]}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/concepts"))
        .and(query_param("id", "l1"))
        .and(query_param("id", "l2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"id": "l1"}, {"id": "l2"}])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    // The document listing matches on the expanded leaf set.
    Mock::given(method("GET"))
        .and(path("/apollodocuments"))
        .and(query_param("about_like", "l1"))
        .and(query_param("about_like", "l2"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Total-Count", "1")
                .set_body_json(json!([{
                    "id": "n1",
                    "title_nl": "Nieuwsbericht",
                    "inPublication": "wkbe-news",
                    "about": ["l2"]
                }])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let schema = schema_for(&mock_server);
    let query = format!(
        r#"{{ searchDocuments(filters: {{ aboutIds: ["{}"] }}) {{
            edges {{ node {{ __typename title(language: NL) }} }}
        }} }}"#,
        global_id("Concept", "root")
    );
    let data = execute(&schema, &query).await;

    let node = &data["searchDocuments"]["edges"][0]["node"];
    assert_eq!(node["__typename"], "WKBENews");
    assert_eq!(node["title"], "Nieuwsbericht");
}

#[tokio::test]
async fn test_legislation_document_variant_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/apollodocuments/leg-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "leg-1",
            "title_nl": "Wet van 1 maart",
            "inPublication": "wkbe-legislation",
            "about": ["c1"],
            "issued": "2019-03-01",
            "publicationDate": "2019-03-15",
            "bibliographicReference": "bib-1"
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/bibliographicreferences/bib-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "bib-1",
            "citation": "BS 2019-03-15"
        })))
        .mount(&mock_server)
        .await;

    let schema = schema_for(&mock_server);
    let query = format!(
        r#"{{ apolloDocument(id: "{}") {{
            __typename
            title(language: NL)
            ... on WKBELegislation {{
                issued
                publicationDate
                bibliographicReference {{ citation }}
            }}
        }} }}"#,
        global_id("WKBELegislation", "leg-1")
    );
    let data = execute(&schema, &query).await;

    let document = &data["apolloDocument"];
    assert_eq!(document["__typename"], "WKBELegislation");
    assert_eq!(document["title"], "Wet van 1 maart");
    assert_eq!(document["issued"], "2019-03-01");
    assert_eq!(document["publicationDate"], "2019-03-15");
    assert_eq!(document["bibliographicReference"]["citation"], "BS 2019-03-15");
}

#[tokio::test]
async fn test_hrlp_content_renditions() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/apollodocuments/doc-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "doc-1",
            "inPublication": "hrlp-lippincott-procedures",
            "about": ["c1"],
            "content": "ct-1"
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/content/ct-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "ct-1",
            "content": "<p>hello</p>",
            "contentType": "text/html"
        })))
        .mount(&mock_server)
        .await;

    let schema = schema_for(&mock_server);
    let query = format!(
        r#"{{ apolloDocument(id: "{}") {{
            ... on HRLPDocument {{
                content {{ asString asBase64 asDataUrl size }}
            }}
        }} }}"#,
        global_id("HRLPDocument", "doc-1")
    );
    let data = execute(&schema, &query).await;

    let content = &data["apolloDocument"]["content"];
    assert_eq!(content["asString"], "<p>hello</p>");
    assert_eq!(content["asBase64"], "PHA+aGVsbG88L3A+");
    assert_eq!(content["asDataUrl"], "data:text/html;base64,PHA+aGVsbG88L3A+");
    assert_eq!(content["size"], 12);
}

#[tokio::test]
async fn test_document_with_unknown_publication_is_a_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/apollodocuments/doc-x"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "doc-x",
            "inPublication": "mystery-publication"
        })))
        .mount(&mock_server)
        .await;

    let schema = schema_for(&mock_server);
    let error = execute_err(
        &schema,
        &format!(
            r#"{{ apolloDocument(id: "{}") {{ title }} }}"#,
            global_id("HRLPDocument", "doc-x")
        ),
    )
    .await;
    assert_eq!(error["extensions"]["code"], "UNRESOLVABLE_TYPE");
}

#[tokio::test]
async fn test_node_reclassifies_and_rejects_malformed_ids() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/concepts/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "p1",
            "title_en": "A publication",
            "bibliographicResourceType":
                "http://data.wolterskluwer.com/apollo/resource/object-type/7c688f91-55e0-4a65-aec4-2185b30ef494"
        })))
        .mount(&mock_server)
        .await;

    let schema = schema_for(&mock_server);

    // Minted as Concept, resolves to the record's actual type.
    let data = execute(
        &schema,
        &format!(
            r#"{{ node(id: "{}") {{ __typename id }} }}"#,
            global_id("Concept", "p1")
        ),
    )
    .await;
    assert_eq!(data["node"]["__typename"], "ApolloPublication");
    assert_eq!(data["node"]["id"], global_id("ApolloPublication", "p1"));

    // An unknown type name is null, not an error.
    let data = execute(
        &schema,
        &format!(r#"{{ node(id: "{}") {{ id }} }}"#, global_id("Gadget", "1")),
    )
    .await;
    assert!(data["node"].is_null());

    // A string that is not a global id at all is a decode error.
    let error = execute_err(&schema, r#"{ node(id: "!!not-base64!!") { id } }"#).await;
    assert_eq!(error["extensions"]["code"], "DECODE_ERROR");
}

#[tokio::test]
async fn test_nodes_preserves_request_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/conceptschemes/subjects"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "subjects", "title_en": "Subjects"})),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/concepts/123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "123"})))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/concepts/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let schema = schema_for(&mock_server);
    let query = format!(
        r#"{{ nodes(ids: ["{}", "{}", "{}"]) {{ __typename }} }}"#,
        global_id("ConceptScheme", "subjects"),
        global_id("Concept", "missing"),
        global_id("Concept", "123"),
    );
    let data = execute(&schema, &query).await;

    let nodes = data["nodes"].as_array().unwrap();
    assert_eq!(nodes.len(), 3);
    assert_eq!(nodes[0]["__typename"], "ConceptScheme");
    assert!(nodes[1].is_null());
    assert_eq!(nodes[2]["__typename"], "Concept");
}

#[tokio::test]
async fn test_backend_failure_carries_the_error_code() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/concepts"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream gone"))
        .mount(&mock_server)
        .await;

    let schema = schema_for(&mock_server);
    let error = execute_err(&schema, "{ concepts { totalCount } }").await;
    assert_eq!(error["extensions"]["code"], "BACKEND_ERROR");
}

#[tokio::test]
async fn test_negative_first_is_an_invalid_input() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/concepts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "1"}])))
        .mount(&mock_server)
        .await;

    let schema = schema_for(&mock_server);
    let error = execute_err(&schema, "{ concepts(first: -1) { totalCount } }").await;
    assert_eq!(error["extensions"]["code"], "INVALID_INPUT");
}
