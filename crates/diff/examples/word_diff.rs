use anyhow::Result;
use text_diff::{DiffGranularity, TextDiff};

fn main() -> Result<()> {
    env_logger::init();

    // Sample texts with word-level differences
    let text1 = "This is the first paragraph with some words.\nHere is another line with minor changes.\nThis line is unchanged.";
    let text2 = "This is the first paragraph with different words.\nHere is another sentence with major changes.\nThis line is unchanged.";

    println!("=== Line-level diff (default) ===");
    print!("{}", TextDiff::unified_diff(text1, text2, 1));

    println!("\n=== Word-level diff ===");
    print!("{}", TextDiff::unified_diff_with_granularity(text1, text2, 1, DiffGranularity::Word));

    println!("\n=== Character-level diff ===");
    print!("{}", TextDiff::unified_diff_with_granularity(text1, text2, 1, DiffGranularity::Character));

    // Example with code
    let code1 = "function calculateTotal(items) {\n    let sum = 0;\n    for (let i = 0; i < items.length; i++) {\n        sum += items[i].price;\n    }\n    return sum;\n}";
    let code2 = "function calculateTotal(items) {\n    let sum = 0;\n    for (let i = 0; i < items.length; i++) {\n        sum += items[i].price * items[i].quantity;\n    }\n    return sum;\n}";

    println!("\n=== Code diff (word-level) ===");
    let diff = TextDiff::diff_with_granularity(code1, code2, DiffGranularity::Word);
    for line in diff.hunks().iter().flat_map(|hunk| &hunk.lines) {
        if line.old_index.is_none() {
            println!("added {:?} on line {}", line.text, line.source_line + 1);
        }
    }

    Ok(())
}
