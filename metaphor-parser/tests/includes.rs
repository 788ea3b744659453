//! Multi-file parsing: `Include:`, `Embed:` and search paths.

use metaphor_parser::metaphor::ast::TextForm;
use metaphor_parser::metaphor::parsing::{parse, parse_document, ParseOptions, Parser};
use metaphor_parser::metaphor::testing::assert_ast;
use metaphor_parser::metaphor::token::TokenType;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

const NO_PATHS: &[&str] = &[];

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create fixture dir");
    }
    fs::write(&path, contents).expect("write fixture");
    path
}

fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[test]
fn test_include_is_spliced_in_place() {
    let dir = tempdir().expect("tempdir");
    let lib = dir.path().join("lib");
    write(&lib, "part.m6r", "Context: Included\n    From the part\n");
    let entry = write(
        dir.path(),
        "main.m6r",
        "Context: Top\n    Intro\n    Include: part.m6r\n    Context: After\n        tail\n",
    );

    let doc = parse(&display(&entry), &[&lib]).expect("parses");
    assert_ast(&doc).context(|top| {
        top.name("Top")
            .child_count(4)
            .child(2, |included| {
                included
                    .is_kind(TokenType::Context)
                    .name("Included")
                    .child(1, |t| {
                        t.is_text("From the part");
                    });
            })
            .child(3, |after| {
                after.name("After");
            });
    });
}

#[test]
fn test_include_at_top_level_adds_sections() {
    let dir = tempdir().expect("tempdir");
    write(dir.path(), "role.m6r", "Role: Librarian\n    Keep order\n");
    let entry = write(
        dir.path(),
        "main.m6r",
        "Include: role.m6r\nAction:\n    Sort the shelves\n",
    );

    let doc = parse(&display(&entry), &[dir.path()]).expect("parses");
    assert_ast(&doc)
        .section_count(2)
        .role(|role| {
            role.name("Librarian");
        })
        .action(|action| {
            action.child_count(1);
        });
}

#[test]
fn test_search_paths_are_tried_in_order() {
    let dir = tempdir().expect("tempdir");
    let first = dir.path().join("first");
    let second = dir.path().join("second");
    write(&first, "shared.m6r", "Role: First\n    one\n");
    write(&second, "shared.m6r", "Role: Second\n    two\n");
    let entry = write(dir.path(), "main.m6r", "Include: shared.m6r\n");

    let doc = parse(&display(&entry), &[&first, &second]).expect("parses");
    assert_ast(&doc).role(|role| {
        role.name("First");
    });

    let doc = parse(&display(&entry), &[&second, &first]).expect("parses");
    assert_ast(&doc).role(|role| {
        role.name("Second");
    });
}

#[test]
fn test_self_include_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let entry = write(dir.path(), "loop.m6r", "Role:\n    Include: loop.m6r\n");

    let errors = parse(&display(&entry), &[dir.path()]).expect_err("fails");
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors.errors()[0].message,
        "The file 'loop.m6r' has already been used"
    );
    assert_eq!(errors.errors()[0].line, 2);
}

#[test]
fn test_transitive_include_cycle_is_rejected() {
    let dir = tempdir().expect("tempdir");
    write(dir.path(), "b.m6r", "Include: c.m6r\n");
    write(dir.path(), "c.m6r", "Include: a.m6r\n");
    let entry = write(dir.path(), "a.m6r", "Include: b.m6r\nRole:\n    x\n");

    let errors = parse(&display(&entry), &[dir.path()]).expect_err("fails");
    let last = errors.errors().last().expect("an error");
    assert_eq!(last.message, "The file 'a.m6r' has already been used");
    assert_eq!(last.filename, display(&dir.path().join("c.m6r")));
}

#[test]
fn test_including_the_same_file_twice_is_rejected() {
    let dir = tempdir().expect("tempdir");
    write(dir.path(), "part.m6r", "Context: Part\n    p\n");
    let entry = write(
        dir.path(),
        "main.m6r",
        "Context:\n    Include: part.m6r\n    Include: part.m6r\n",
    );

    let errors = parse(&display(&entry), &[dir.path()]).expect_err("fails");
    assert!(errors.contains_message("The file 'part.m6r' has already been used"));
}

#[test]
fn test_missing_include_stops_the_parse() {
    let dir = tempdir().expect("tempdir");
    let entry = write(
        dir.path(),
        "main.m6r",
        "Role:\n    Include: nowhere.m6r\nstray\n",
    );

    let errors = parse(&display(&entry), &[dir.path()]).expect_err("fails");
    // Nothing after the fatal error is looked at
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.errors()[0].message, "File not found: nowhere.m6r");
}

#[test]
fn test_embed_wildcard_in_match_order() {
    let dir = tempdir().expect("tempdir");
    write(dir.path(), "test1.txt", "Content 1");
    write(dir.path(), "test2.txt", "Content 2\nsecond line");
    write(dir.path(), "skip.md", "nope");
    let entry = write(
        dir.path(),
        "main.m6r",
        "Context: Files\n    Embed: test*.txt\n",
    );

    let options = ParseOptions {
        simplify: false,
        ..ParseOptions::default()
    }
    .with_search_paths([dir.path()]);
    let doc = parse_document(&display(&entry), &options).expect("parses");

    let first = format!("File: {}", display(&dir.path().join("test1.txt")));
    let second = format!("File: {}", display(&dir.path().join("test2.txt")));
    assert_ast(&doc).context(|files| {
        files
            .name("Files")
            .child_count(10)
            .child(1, |t| {
                t.is_text(&first);
            })
            .child(2, |t| {
                t.is_text("```plaintext");
            })
            .child(3, |t| {
                t.is_text("Content 1");
            })
            .child(4, |t| {
                t.is_text("```");
            })
            .child(5, |t| {
                t.is_text(&second);
            })
            .child(8, |t| {
                t.is_text("second line");
            });
    });
}

#[test]
fn test_embedded_files_become_fenced_blocks() {
    let dir = tempdir().expect("tempdir");
    write(dir.path(), "src/main.rs", "fn main() {\n\n    println!(\"hi\");\n}\n");
    write(dir.path(), "src/nested/util.py", "# not a comment here\nx = 1\n");
    let pattern = format!("{}/src/**/*.*", display(dir.path()));
    let entry = write(
        dir.path(),
        "main.m6r",
        &format!("Action: Review\n    Please review:\n\n    Embed: {}\n", pattern),
    );

    let doc = parse_document(&display(&entry), &ParseOptions::default()).expect("parses");
    assert_ast(&doc).action(|action| {
        action.child_count(6).child(1, |t| {
            t.is_text("Please review:");
        });
    });

    let action = doc.action().expect("action");
    let mut fenced: Vec<&str> = action
        .text_children()
        .filter(|t| t.form() == TextForm::Fenced)
        .map(|t| t.value())
        .collect();
    fenced.sort();
    assert_eq!(
        fenced,
        vec![
            "```python\n# not a comment here\nx = 1\n```",
            "```rust\nfn main() {\n\n    println!(\"hi\");\n}\n```",
        ]
    );
}

#[test]
fn test_embed_without_matches() {
    let dir = tempdir().expect("tempdir");
    let entry = write(
        dir.path(),
        "main.m6r",
        "Role:\n    Embed: nothing-*.zzz\n    still parsed\nstray\n",
    );

    let errors = parse(&display(&entry), &[dir.path()]).expect_err("fails");
    assert_eq!(
        errors.iter().map(|e| e.message.as_str()).collect::<Vec<_>>(),
        vec![
            "nothing-*.zzz does not match any files for 'Embed'",
            "Unexpected token: stray at top level",
        ]
    );
    assert_eq!(errors.errors()[0].column, 12);
}

#[test]
fn test_in_memory_source_can_include_files() {
    let dir = tempdir().expect("tempdir");
    write(dir.path(), "ctx.m6r", "Context: Shared\n    facts\n");

    let doc = Parser::default()
        .parse_source("Include: ctx.m6r\n", "inline.m6r", &[dir.path()])
        .expect("parses");
    assert_ast(&doc).context(|ctx| {
        ctx.name("Shared");
    });

    let errors = Parser::default()
        .parse_source("Include: missing.m6r\n", "inline.m6r", NO_PATHS)
        .expect_err("fails");
    assert_eq!(errors.errors()[0].filename, "inline.m6r");
}
