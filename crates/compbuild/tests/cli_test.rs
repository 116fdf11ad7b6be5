#![allow(deprecated)] // TODO: cargo_bin → cargo_bin_cmd! へ移行

use assert_cmd::Command;
use predicates::prelude::*;
mod common;
use common::TestProject;

/// CLIヘルプが正しく表示されることを確認
#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("compbuild").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("コンポーネントのコンテナイメージをビルド"))
        .stdout(predicate::str::contains("[IMAGE]"))
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--tool"));
}

/// --list で全イメージがビルド順に表示されることを確認
#[test]
fn test_list_images() {
    let project = TestProject::new();
    project
        .compbuild()
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::is_match("(?s)openrouter.*whisper.*chatterbox.*openvoice.*spanishf5").unwrap())
        .stdout(predicate::str::contains("--build-arg USE_GPU=${USE_GPU:-false}"));
}

/// 引数なしで全イメージのビルドコマンドが順番に1回ずつ出ることを確認
#[test]
fn test_dry_run_all() {
    let project = TestProject::new();
    project
        .compbuild()
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(
            predicate::str::is_match(
                "(?s)docker build -t openrouter:latest .*\
                 docker build -t whisper:latest .*\
                 docker build -t chatterbox:latest .*\
                 docker build -t openvoice:latest .*\
                 docker build -t spanishf5:latest ",
            )
            .unwrap(),
        )
        .stdout(predicate::str::contains("5 個のビルドコマンド"));
}

/// all を指定した場合も全イメージが対象になることを確認
#[test]
fn test_dry_run_all_literal() {
    let project = TestProject::new();
    project
        .compbuild()
        .arg("all")
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("[5/5] spanishf5"));
}

/// イメージ名を指定すると1つだけビルドされることを確認
#[test]
fn test_dry_run_single_image() {
    let project = TestProject::new();
    project
        .compbuild()
        .arg("chatterbox")
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "docker build -t chatterbox:latest -f ./components/TTS/Chatterbox/Dockerfile \
             --build-arg USE_GPU=false ./components/TTS/Chatterbox",
        ))
        .stdout(predicate::str::contains("[1/1]"))
        .stdout(predicate::str::contains("openrouter:latest").not());
}

/// 不明なイメージ名ではビルドせずに終了コード2で失敗することを確認
#[test]
fn test_unknown_image() {
    let project = TestProject::new();
    project
        .compbuild()
        .arg("lmstudio")
        .arg("--dry-run")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("不明なイメージ名です: lmstudio"))
        .stderr(predicate::str::contains("openrouter"))
        .stdout(predicate::str::contains("ビルド中").not());
}

/// .env の値がビルド引数に使われ、コメント行は無視されることを確認
#[test]
fn test_env_file_build_arg() {
    let project = TestProject::new();
    project.write_env("# USE_GPU=false\nUSE_GPU=true\n");

    project
        .compbuild()
        .arg("whisper")
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("環境変数ファイル"))
        .stdout(predicate::str::contains("--build-arg USE_GPU=true"))
        .stdout(predicate::str::contains("USE_GPU=false").not());
}

/// 呼び出し元の環境変数が .env より優先されることを確認
#[test]
fn test_ambient_env_wins_over_env_file() {
    let project = TestProject::new();
    project.write_env("USE_GPU=true\n");

    project
        .compbuild()
        .env("USE_GPU", "false")
        .arg("whisper")
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("--build-arg USE_GPU=false"));
}

/// .env が無い場合はデフォルト値が使われることを確認
#[test]
fn test_missing_env_file_uses_default() {
    let project = TestProject::new();

    project
        .compbuild()
        .arg("openvoice")
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("環境変数ファイル").not())
        .stdout(predicate::str::contains("--build-arg USE_GPU=false"));
}

/// --env-file で別のファイルを指定できることを確認
#[test]
fn test_explicit_env_file() {
    let project = TestProject::new();
    let path = project.path().join("gpu.env");
    std::fs::write(&path, "USE_GPU=true\n").unwrap();

    project
        .compbuild()
        .arg("spanishf5")
        .arg("--env-file")
        .arg(&path)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("--build-arg USE_GPU=true"));
}

/// -- 以降の引数がビルドツールに渡されることを確認
#[test]
fn test_extra_args_forwarded() {
    let project = TestProject::new();

    project
        .compbuild()
        .arg("--tool")
        .arg("podman")
        .arg("--dry-run")
        .arg("openrouter")
        .arg("--")
        .arg("--no-cache")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "podman build -t openrouter:latest -f ./components/LM/OpenRouter/Dockerfile \
             --no-cache ./components/LM/OpenRouter",
        ));
}

/// ビルド失敗時は終了コードを伝播し、残りをビルドしないことを確認
#[cfg(unix)]
#[test]
fn test_build_failure_is_fail_fast() {
    let project = TestProject::new();

    project
        .compbuild()
        .arg("--tool")
        .arg("false")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("[1/5] openrouter"))
        .stdout(predicate::str::contains("[2/5]").not())
        .stderr(predicate::str::contains("openrouter"));
}

/// ビルドツールが見つからない場合は終了コード127で失敗することを確認
#[test]
fn test_missing_tool() {
    let project = TestProject::new();

    project
        .compbuild()
        .arg("--tool")
        .arg("compbuild-no-such-tool")
        .arg("openrouter")
        .assert()
        .failure()
        .code(127)
        .stderr(predicate::str::contains("compbuild-no-such-tool"));
}

/// ビルドツールが成功した場合は全イメージがサマリーに出ることを確認
#[cfg(unix)]
#[test]
fn test_build_success_summary() {
    let project = TestProject::new();

    project
        .compbuild()
        .arg("--tool")
        .arg("true")
        .assert()
        .success()
        .stdout(predicate::str::contains("すべてのイメージがビルドされました"))
        .stdout(predicate::str::contains("spanishf5:latest"));
}
