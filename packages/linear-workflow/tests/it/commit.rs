//! Commit subject validation through the `PreToolUse` Bash hook.

use pretty_assertions::assert_eq as pretty_assert_eq;
use simple_test_case::test_case;

use crate::{Project, bash_hook};

#[test_case(r#"git commit -m "feat(auth): add login""#; "double quoted")]
#[test_case("git commit -m 'fix: handle empty branch'"; "single quoted")]
#[test_case(r#"git commit -am "✨ feat: add sparkles""#; "combined flags with emoji")]
#[test_case(r#"git commit --message="docs: update readme""#; "long flag")]
#[test_case("git commit -m \"$(cat <<'EOF'\nfeat: x\n\nbody\nEOF\n)\""; "heredoc")]
#[test_case(r#"git commit -m "Merge branch 'main' into LIN-1-x""#; "merge exemption")]
#[test_case("git commit --amend --no-edit"; "no inline message")]
#[test_case("ls -la"; "not a commit")]
#[test_case("python -m pytest && git commit -F msg.txt"; "message flag of another command")]
#[test_case("cat <<EOF > notes.md\nsome notes\nEOF\ngit commit -F msg.txt"; "heredoc of another command")]
#[test_case(r#"git commit -m "$(cat msg.txt)""#; "message built at run time")]
#[test]
fn accepted(command: &str) {
    let project = Project::new();
    project.hook(&bash_hook(&project, command)).assert_silent();
}

#[test_case(r#"git commit -m "added login""#, "added login"; "no type")]
#[test_case(r#"git commit -m "feature: add login""#, "feature: add login"; "unknown type")]
#[test_case("git commit -m \"$(cat <<'EOF'\nupdated stuff\n\nbody\nEOF\n)\"", "updated stuff"; "heredoc")]
#[test_case(r#"git add . && git commit -m "wip""#, "wip"; "chained")]
#[test_case("git add .;git commit -m 'added login'", "added login"; "semicolon without space")]
#[test_case("make&&git commit -m 'added login'", "added login"; "and without space")]
#[test_case("git commit -m \"$(cat <<'EOF'\n\nadded login\nEOF\n)\"", "added login"; "heredoc with leading blank line")]
#[test]
fn rejected(command: &str, subject: &str) {
    let project = Project::new();
    let outcome = project.hook(&bash_hook(&project, command));
    pretty_assert_eq!(outcome.code, 2, "{outcome:?}");
    assert!(outcome.stdout.is_empty(), "block goes to stderr: {outcome:?}");
    assert!(
        outcome
            .stderr
            .contains(&format!("Invalid commit format: '{subject}'")),
        "got: {outcome:?}"
    );
    assert!(outcome.stderr.contains("Types: feat, fix"), "got: {outcome:?}");
}

#[test]
fn rejection_applies_without_activation() {
    let project = Project::new();
    assert!(!project.path().join(".claude").exists());
    let outcome = project.hook(&bash_hook(&project, "git commit -m oops"));
    pretty_assert_eq!(outcome.code, 2, "{outcome:?}");
}

#[test]
fn description_over_limit_is_rejected() {
    let project = Project::new();
    let command = format!("git commit -m 'feat: {}'", "x".repeat(101));
    let outcome = project.hook(&bash_hook(&project, &command));
    pretty_assert_eq!(outcome.code, 2, "{outcome:?}");
}
