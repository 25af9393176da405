//! End-to-end workflow scenarios with stubbed collaborators.

mod common;

use std::sync::Arc;

use common::{CannedTools, FixedRetriever, StubProvider, orchestrator};
use regdesk::agent::Stage;
use regdesk::agent::prompt::{DIRECTIVE_MARKER, SUMMARY_DIRECTIVE};
use regdesk::core::Route;
use regdesk::core::sentinel::NO_DOCUMENTS;
use regdesk::tools::{GET_TABLE_OF_CONTENTS, LIST_PDFS};
use serde_json::json;

#[tokio::test]
async fn scenario_retrieval_answers_with_registrar_note() {
    let provider = Arc::new(StubProvider::new(&[
        ("router", "RETRIEVAL"),
        (
            "analyzer",
            "- O trancamento deve ser pedido em até 30 dias.\n- É permitido até duas vezes.",
        ),
        (
            "answer",
            "Você pode trancar a matrícula em até **30 dias**.\n\n> Consulte a secretaria acadêmica para informações oficiais.",
        ),
    ]));
    let retriever = Arc::new(FixedRetriever::new(&[
        "Art. 40. O trancamento de matrícula poderá ser solicitado em até 30 dias.",
        "Art. 41. O trancamento é permitido no máximo duas vezes.",
        "Art. 42. O pedido é feito na secretaria acadêmica.",
    ]));
    let tools = Arc::new(CannedTools::new(&[]));

    let outcome = orchestrator(&provider, &retriever, &tools)
        .run_detailed("Como faço o trancamento de matrícula?")
        .await;

    assert_eq!(outcome.route, Some(Route::Retrieval));
    assert_eq!(outcome.stage, Stage::Answered);
    assert!(outcome.answer.contains("secretaria"));
    assert_eq!(retriever.calls(), 1);
    assert!(tools.calls().is_empty());

    let analyzer_input = provider.input_for("analyzer").unwrap_or_default();
    assert_eq!(analyzer_input.matches("Art. ").count(), 3);
    assert!(analyzer_input.contains("30 dias.\n\nArt. 41"));

    let answer_input = provider.input_for("answer").unwrap_or_default();
    assert!(answer_input.contains(DIRECTIVE_MARKER));
    assert!(answer_input.contains("'Como faço o trancamento de matrícula?'"));
}

#[tokio::test]
async fn scenario_table_of_contents_with_selection() {
    let toc = "- Título I - Das Disposições Gerais\n- Título II - Do Ensino\n  - Capítulo I - Da Matrícula";
    let provider = Arc::new(StubProvider::new(&[
        ("router", "TOOL"),
        ("selector", "regimento_geral.pdf"),
        ("analyzer", toc),
        (
            "answer",
            "Claro! Aqui está o sumário do regimento:\n\n- Título I\n- Título II\n\nEspero ter ajudado!",
        ),
    ]));
    let retriever = Arc::new(FixedRetriever::new(&[]));
    let tools = Arc::new(CannedTools::new(&[
        (
            LIST_PDFS,
            json!({"ok": true, "files": ["/srv/Documentos/regulamento_graduacao.pdf", "/srv/Documentos/regimento_geral.pdf"]}),
        ),
        (
            GET_TABLE_OF_CONTENTS,
            json!({"ok": true, "table_of_contents": toc}),
        ),
    ]));

    let outcome = orchestrator(&provider, &retriever, &tools)
        .run_detailed("Qual o sumário do regimento geral?")
        .await;

    assert_eq!(outcome.route, Some(Route::Tool));
    assert_eq!(outcome.stage, Stage::Answered);
    assert_eq!(
        outcome.document.as_deref(),
        Some("/srv/Documentos/regimento_geral.pdf")
    );
    assert!(!outcome.selection_fallback);
    assert!(outcome.answer.starts_with("Claro!"));
    assert_eq!(provider.calls_for("selector"), 1);
    assert_eq!(retriever.calls(), 0);

    let selector_prompt = provider.input_for("selector").unwrap_or_default();
    assert!(selector_prompt.contains("- regulamento_graduacao.pdf"));
    assert!(selector_prompt.contains("- regimento_geral.pdf"));

    let calls = tools.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].0, GET_TABLE_OF_CONTENTS);
    assert_eq!(
        calls[1].1.get("path"),
        Some(&json!("/srv/Documentos/regimento_geral.pdf"))
    );

    let answer_input = provider.input_for("answer").unwrap_or_default();
    assert!(answer_input.ends_with(SUMMARY_DIRECTIVE));
}

#[tokio::test]
async fn scenario_empty_listing_returns_not_found() {
    let provider = Arc::new(StubProvider::new(&[
        ("router", "TOOL"),
        ("analyzer", "nunca"),
        ("answer", "nunca"),
    ]));
    let retriever = Arc::new(FixedRetriever::new(&[]));
    let tools = Arc::new(CannedTools::new(&[(
        LIST_PDFS,
        json!({"ok": true, "files": []}),
    )]));

    let answer = orchestrator(&provider, &retriever, &tools)
        .run("Quais são os capítulos do regulamento?")
        .await;

    assert_eq!(answer, NO_DOCUMENTS);
    assert!(answer.starts_with("Nenhum documento PDF foi encontrado"));
    assert_eq!(provider.calls_for("analyzer"), 0);
    assert_eq!(provider.calls_for("answer"), 0);
    assert_eq!(provider.calls_for("selector"), 0);
}

#[tokio::test]
async fn concurrent_runs_share_one_orchestrator() {
    let provider = Arc::new(StubProvider::new(&[
        ("router", "RETRIEVAL"),
        ("analyzer", "análise"),
        ("answer", "resposta"),
    ]));
    let retriever = Arc::new(FixedRetriever::new(&["P1"]));
    let tools = Arc::new(CannedTools::new(&[]));
    let orchestrator = Arc::new(orchestrator(&provider, &retriever, &tools));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let orchestrator = Arc::clone(&orchestrator);
            tokio::spawn(async move { orchestrator.run(&format!("pergunta {i}")).await })
        })
        .collect();

    for handle in handles {
        let answer = handle.await.unwrap_or_default();
        assert_eq!(answer, "resposta");
    }
    assert_eq!(provider.calls_for("router"), 8);
    assert_eq!(retriever.calls(), 8);
}
