use anyhow::Result;
use diff_render::{InlineDiff, Theme, EXPORT_WIDTH};

const OLD: &str = r#"def format_user(name, role):
    return f"{name} ({role})"

def can_access(role, resource):
    if role == "admin":
        return True
    if role == "editor" and resource != "billing":
        return True
    return False

print(format_user("Sam", "editor"))
"#;

const NEW: &str = r#"def format_user(name: str, role: str) -> str:
    return f"{name} [{role}]"

def can_access(role: str, resource: str) -> bool:
    if role in ("admin", "owner"):
        return True
    if role == "editor" and resource not in ("billing", "secrets"):
        return True
    return False

# demo
print(format_user("Sam", "owner"))
"#;

fn main() -> Result<()> {
    env_logger::init();

    let diff = InlineDiff::new(OLD, NEW);

    // 1) Terminal (or notebook, or plain text when piped)
    println!("=== Auto display ===");
    diff.show(EXPORT_WIDTH)?;

    // 2) Logging: Display renders plain text
    log::info!("diff of the sample snippet:\n{diff}");

    // 3) ANSI string, e.g. for a colour-aware log stream
    println!("\n=== ANSI, changes only, green theme ===");
    let changes_only = diff.clone().show_unchanged(false).theme(Theme::green());
    print!("{}", changes_only.to_ansi(EXPORT_WIDTH, true)?);

    // 4) Plain text, e.g. for a log file
    println!("\n=== Plain ===");
    print!("{}", diff.to_plain(EXPORT_WIDTH, false)?);

    // 5) HTML fragment
    println!("\n=== HTML ===");
    println!("{}", diff.to_html(EXPORT_WIDTH, false)?);

    Ok(())
}
