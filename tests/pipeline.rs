//! End-to-end pipeline integration tests
//!
//! Exercises archive extraction, chunking, index build and search
//! together over synthetic in-memory GitHub-style ZIP archives, plus
//! the branch fallback policy with stubbed download attempts.

use std::io::{Cursor, Write};
use std::sync::atomic::{AtomicUsize, Ordering};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use griot::core::ingest::{
    chunk_documents, extract_documents, try_branches, ExtractFilter, RepoContext,
};
use griot::core::types::fields;
use griot::{GriotError, SearchIndex};

/// Build a ZIP archive with the synthetic `{repo}-{branch}/` prefix
/// GitHub puts on codeload snapshots.
fn github_archive(prefix: &str, entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (path, content) in entries {
        writer
            .start_file(format!("{prefix}/{path}"), SimpleFileOptions::default())
            .expect("start archive entry");
        writer
            .write_all(content.as_bytes())
            .expect("write archive entry");
    }
    writer.finish().expect("finish archive").into_inner()
}

fn test_repo() -> RepoContext {
    RepoContext {
        owner: "OpenZeppelin".to_string(),
        name: "openzeppelin-contracts".to_string(),
        branch: "master".to_string(),
    }
}

fn md_filter() -> ExtractFilter {
    ExtractFilter {
        include_exts: vec![".md".to_string(), ".mdx".to_string()],
        include_prefixes: vec![],
    }
}

#[test]
fn test_extract_chunk_index_search() {
    let archive = github_archive(
        "openzeppelin-contracts-master",
        &[
            (
                "docs/erc20.md",
                "---\ntitle: ERC-20 Tokens\n---\nERC-20 is the fungible token standard. \
                 The transfer function moves tokens between accounts, and approve \
                 delegates spending to a third party.",
            ),
            (
                "docs/erc721.md",
                "---\ntitle: ERC-721 NFTs\n---\nERC-721 defines non-fungible tokens. \
                 Each token has a unique identifier and an owner.",
            ),
            (
                "docs/governance.md",
                "Governance contracts let token holders vote on proposals on-chain.",
            ),
        ],
    );

    let docs = extract_documents(&archive, &test_repo(), &md_filter()).expect("extract");
    assert_eq!(docs.len(), 3);

    let chunks = chunk_documents(docs, 80, 40).expect("chunk");
    assert!(chunks.len() >= 3, "each document yields at least one chunk");

    let index = SearchIndex::build(&chunks).expect("build index");
    assert_eq!(index.len(), chunks.len());

    let results = index.search("fungible token standard transfer", 5).expect("search");
    assert!(!results.is_empty());
    assert_eq!(results[0].path(), "docs/erc20.md");

    // Chunk records carry the full document metadata plus pipeline fields
    let top = &results[0];
    assert_eq!(top.str_field("title"), "ERC-20 Tokens");
    assert_eq!(top.branch(), "master");
    assert_eq!(top.str_field(fields::REPO_OWNER), "OpenZeppelin");
    assert!(top.start().is_some(), "chunks carry a start offset");
}

#[test]
fn test_unchunked_documents_are_searchable() {
    let archive = github_archive(
        "openzeppelin-contracts-master",
        &[(
            "README.md",
            "Install the contracts library with your package manager of choice.",
        )],
    );

    let docs = extract_documents(&archive, &test_repo(), &md_filter()).expect("extract");
    let index = SearchIndex::build(&docs).expect("build index");

    let results = index.search("install library", 5).expect("search");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].path(), "README.md");
    // Whole documents have no chunk offset
    assert!(results[0].start().is_none());
}

#[test]
fn test_prefix_filter_limits_extraction() {
    let archive = github_archive(
        "openzeppelin-contracts-master",
        &[
            ("docs/guide.md", "Documentation lives here."),
            ("CHANGELOG.md", "Release notes live here."),
        ],
    );

    let filter = ExtractFilter {
        include_exts: vec![".md".to_string()],
        include_prefixes: vec!["docs/".to_string()],
    };

    let docs = extract_documents(&archive, &test_repo(), &filter).expect("extract");
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].path(), "docs/guide.md");
}

#[test]
fn test_non_markdown_entries_ignored() {
    let archive = github_archive(
        "openzeppelin-contracts-master",
        &[
            ("docs/guide.md", "Keep this."),
            ("src/token.sol", "contract Token {}"),
            ("package.json", "{}"),
        ],
    );

    let docs = extract_documents(&archive, &test_repo(), &md_filter()).expect("extract");
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].path(), "docs/guide.md");
}

#[test]
fn test_bad_front_matter_aborts_extraction() {
    let archive = github_archive(
        "openzeppelin-contracts-master",
        &[
            ("docs/good.md", "---\ntitle: Fine\n---\nBody."),
            ("docs/bad.md", "---\ntitle: [unclosed\n---\nBody."),
        ],
    );

    let err = extract_documents(&archive, &test_repo(), &md_filter())
        .expect_err("malformed YAML front matter should fail the pass");
    assert!(matches!(err, GriotError::ParseFailed { .. }));
}

#[test]
fn test_search_ranks_relevant_chunk_first() {
    // Many filler documents plus one that actually answers the query
    let mut entries: Vec<(String, String)> = (0..20)
        .map(|i| {
            (
                format!("docs/filler_{i}.md"),
                format!("Generic page number {i} about unrelated topics."),
            )
        })
        .collect();
    entries.push((
        "docs/upgradeable.md".to_string(),
        "Proxy patterns allow upgradeable smart contracts by separating storage \
         from logic."
            .to_string(),
    ));

    let borrowed: Vec<(&str, &str)> = entries
        .iter()
        .map(|(p, c)| (p.as_str(), c.as_str()))
        .collect();
    let archive = github_archive("openzeppelin-contracts-master", &borrowed);

    let docs = extract_documents(&archive, &test_repo(), &md_filter()).expect("extract");
    let chunks = chunk_documents(docs, 200, 100).expect("chunk");
    let index = SearchIndex::build(&chunks).expect("build index");

    let results = index.search("upgradeable proxy storage logic", 5).expect("search");
    assert!(results.len() <= 5);
    assert_eq!(results[0].path(), "docs/upgradeable.md");
}

#[tokio::test]
async fn test_branch_fallback_takes_second_candidate() {
    let branches = vec!["main".to_string(), "master".to_string()];
    let attempts = AtomicUsize::new(0);

    let (value, branch) = try_branches(&branches, |branch| {
        attempts.fetch_add(1, Ordering::SeqCst);
        async move {
            if branch == "master" {
                Ok(42u32)
            } else {
                Err(GriotError::FetchFailed {
                    branches: vec![branch],
                    last_error: "404".to_string(),
                })
            }
        }
    })
    .await
    .expect("second branch succeeds");

    assert_eq!(value, 42);
    assert_eq!(branch, "master");
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_branch_fallback_exhaustion_reports_all_candidates() {
    let branches = vec!["main".to_string(), "master".to_string()];

    let err = try_branches::<u32, _, _>(&branches, |branch| async move {
        Err(GriotError::FetchFailed {
            branches: vec![branch],
            last_error: "connection refused".to_string(),
        })
    })
    .await
    .expect_err("all branches fail");

    match err {
        GriotError::FetchFailed { branches, last_error } => {
            assert_eq!(branches, vec!["main".to_string(), "master".to_string()]);
            assert!(last_error.contains("connection refused"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_branch_fallback_stops_at_first_success() {
    let branches = vec!["main".to_string(), "master".to_string()];
    let attempts = AtomicUsize::new(0);

    let (_, branch) = try_branches(&branches, |_branch| {
        attempts.fetch_add(1, Ordering::SeqCst);
        async move { Ok(()) }
    })
    .await
    .expect("first branch succeeds");

    assert_eq!(branch, "main");
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}

#[test]
fn test_empty_query_is_rejected() {
    let archive = github_archive(
        "openzeppelin-contracts-master",
        &[("docs/guide.md", "Some content.")],
    );
    let docs = extract_documents(&archive, &test_repo(), &md_filter()).expect("extract");
    let index = SearchIndex::build(&docs).expect("build index");

    let err = index.search("   ", 5).expect_err("blank query");
    assert!(matches!(err, GriotError::InvalidQuery(_)));
}

#[test]
fn test_multibyte_documents_survive_the_pipeline() {
    let archive = github_archive(
        "openzeppelin-contracts-master",
        &[(
            "docs/i18n.md",
            "Les contrats intelligents — 智能合约 — support UTF-8 throughout. \
             Tokens café résumé naïve 日本語のドキュメント repeated tokens café.",
        )],
    );

    let docs = extract_documents(&archive, &test_repo(), &md_filter()).expect("extract");
    // Small windows force boundaries inside multibyte runs
    let chunks = chunk_documents(docs, 25, 10).expect("chunk");
    for chunk in &chunks {
        assert!(chunk.content().chars().count() <= 25);
    }

    let index = SearchIndex::build(&chunks).expect("build index");
    let results = index.search("café", 5).expect("search");
    assert!(!results.is_empty());
}
