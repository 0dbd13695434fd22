use anyhow::Result;
use text_diff::{DiffLineType, TextDiff};

fn main() -> Result<()> {
    env_logger::init();

    // Two sample texts to compare
    let text1 = "This is the first line.\nHere is the second line.\nAnd the third line.";
    let text2 = "This is the first line.\nThis is a completely different second line.\nAnd the third line.\nPlus a new fourth line.";

    // Generate a unified diff
    println!("Unified diff:");
    print!("{}", TextDiff::unified_diff(text1, text2, 1));

    let diff = TextDiff::diff(text1, text2);

    println!("\nDiff statistics:");
    println!("  Total hunks: {}", diff.hunk_count());
    println!("  Added lines: {}", diff.added());
    println!("  Deleted lines: {}", diff.removed());
    println!("  Unchanged lines: {}", diff.unchanged());

    // Print hunks with color-coded line types
    println!("\nHunks with line types:");
    for (i, hunk) in diff.hunks().iter().enumerate() {
        println!("Hunk {}: {}", i + 1, hunk.header());
        println!("  Status: {}", hunk.status);

        for line in &hunk.lines {
            let text = line.text.trim_end_matches('\n');
            match line.line_type {
                DiffLineType::OldOnly => println!("    \x1b[31m-{}\x1b[0m", text),
                DiffLineType::NewOnly => println!("    \x1b[32m+{}\x1b[0m", text),
                DiffLineType::Both => println!("    \x1b[37m {}\x1b[0m", text),
            }
        }
    }

    // Patching the old text gives back the new one
    let patched = diff.apply(text1)?;
    println!("\nPatched text matches: {}", patched == text2);

    Ok(())
}
