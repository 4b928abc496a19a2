//! CLI contract tests
//!
//! Runs the compiled binary inside temporary directories so no local
//! spanflag.toml or data_train.csv leaks into the results.

use std::path::Path;
use std::process::Command;

fn spanflag_bin() -> String {
    env!("CARGO_BIN_EXE_spanflag").to_string()
}

fn run(dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(spanflag_bin())
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("SPANFLAG_CONFIG")
        .output()
        .expect("Failed to run spanflag");
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

fn labeled_csv(dir: &Path) -> std::path::PathBuf {
    let rows = [
        ("mày ngu quá", 1, "4-7"),
        ("đúng là đồ dốt", 1, "11-14"),
        ("cút đi", 1, "0-6"),
        ("đồ rác rưởi", 1, "0-11"),
        ("thằng này vô học", 1, "10-16"),
        ("đồ điên", 1, "0-7"),
        ("đáng khinh", 1, "0-10"),
        ("thối lợm thật sự", 1, "0-8"),
        ("vcl dở tệ", 1, "0-3"),
        ("cút", 1, "0-3"),
        ("bạn nên cố gắng hơn", 0, ""),
        ("mình góp ý nhẹ nhàng", 0, ""),
        ("bài làm còn thiếu ý", 0, ""),
        ("nên bổ sung ví dụ minh họa", 0, ""),
        ("cần cải thiện cách trình bày", 0, ""),
        ("phản hồi mang tính xây dựng", 0, ""),
        ("thầy cô sẽ hỗ trợ thêm", 0, ""),
        ("cả lớp làm khá tốt", 0, ""),
        ("chúc mừng bạn tiến bộ", 0, ""),
        ("nội dung ổn", 0, ""),
    ];
    let mut content = String::from("text,label,spans\n");
    for (text, label, spans) in rows {
        content.push_str(&format!("{},{},{}\n", text, label, spans));
    }
    let path = dir.join("labeled.csv");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_analyze_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run(dir.path(), &["analyze", "mày", "ngu", "quá", "-f", "json"]);
    assert_eq!(code, 0);

    let parsed: serde_json::Value = serde_json::from_str(stdout.trim()).expect("valid JSON");
    assert_eq!(parsed["prediction"], 1);
    assert_eq!(parsed["is_profane_by_list"], true);
    let spans = parsed["spans"].as_array().unwrap();
    let from_lexicon = |s: &serde_json::Value| {
        s["source"].as_array().unwrap().iter().any(|v| v == "lexicon")
    };
    assert!(spans.iter().any(from_lexicon));
}

#[test]
fn test_analyze_text_output() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run(dir.path(), &["analyze", "bạn nên cố gắng hơn"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("clean"));
}

#[test]
fn test_batch_respects_limit() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("comments.txt");
    std::fs::write(&input, "đồ ngu\n\ncảm ơn bạn\nvcl\ncút đi\n").unwrap();

    let (code, stdout, _) = run(dir.path(), &["batch", "comments.txt", "--limit", "3"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(stdout.trim()).expect("valid JSON");
    assert_eq!(parsed["items"].as_array().unwrap().len(), 3);
    assert_eq!(parsed["chart"]["labels"][2], "#3");
    assert_eq!(parsed["items"][0]["prediction"], 1);
}

#[test]
fn test_batch_survives_invalid_utf8_line() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("in.txt"),
        b"\xc4\x91\xe1\xbb\x93 ngu\nbad \xff line\nc\xe1\xba\xa3m \xc6\xa1n\n",
    )
    .unwrap();

    let (code, stdout, stderr) = run(dir.path(), &["batch", "in.txt"]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    let parsed: serde_json::Value = serde_json::from_str(stdout.trim()).expect("valid JSON");
    let items = parsed["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["prediction"], 1);
    assert!(items.iter().all(|item| item.get("error").is_none()));
}

#[test]
fn test_eval_prints_table_and_writes_summary() {
    let dir = tempfile::tempdir().unwrap();
    labeled_csv(dir.path());

    let args = [
        "eval", "--csv", "labeled.csv", "--spans-col", "spans", "--k", "5",
    ];
    let (code, stdout, stderr) = run(dir.path(), &args);
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(stdout.contains("[Fold 1] Lex F1="));
    assert!(stdout.contains("[Fold 5]"));
    assert!(stdout.contains("| Model | Precision | Recall | F1 | AUC |"));
    assert!(stdout.contains("[Span]"));

    let summary = dir.path().join("metrics_summary.json");
    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(summary).unwrap()).unwrap();
    for key in ["lex", "ml", "hyb"] {
        assert!(parsed[key]["f1"].as_array().unwrap().len() == 2);
    }
    assert_eq!(parsed["lex"]["f1"][0], 1.0);
}

#[test]
fn test_eval_missing_label_column_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("bad.csv"), "comment\nđồ ngu\n").unwrap();
    let (code, _, stderr) = run(dir.path(), &["eval", "--csv", "bad.csv"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Missing column"));
}

#[test]
fn test_train_then_analyze_with_saved_model() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run(dir.path(), &["train", "-o", "model.json"]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(dir.path().join("model.json").exists());

    let args = ["analyze", "vcl dở tệ", "--model", "model.json", "-f", "json"];
    let (code, stdout, _) = run(dir.path(), &args);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(parsed["prediction"], 1);
    assert_eq!(parsed["spans"][0]["start"], 0);
    assert_eq!(parsed["spans"][0]["end"], 3);
}

#[test]
fn test_init_and_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run(dir.path(), &["init"]);
    assert_eq!(code, 0);
    assert!(dir.path().join("spanflag.toml").exists());

    std::fs::write(dir.path().join("spanflag.toml"), "[eval]\nk = 0\n").unwrap();
    let (code, _, _) = run(dir.path(), &["analyze", "xin chào"]);
    assert_ne!(code, 0);
}
