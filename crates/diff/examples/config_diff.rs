use anyhow::Result;
use text_diff::{CancellationToken, DiffGranularity, TextDiff};

fn main() -> Result<()> {
    env_logger::init();

    // Sample text with whitespace differences
    let text1 = "function calculateSum(a, b) {\n    return a+b;\n}\n";
    let text2 = "function  calculateSum(a, b) {\n  return a+b;\n}\n";

    println!("=== Default diff (shows whitespace changes) ===");
    print!("{}", TextDiff::unified_diff(text1, text2, 1));

    println!("\n=== Ignoring whitespace ===");
    let relaxed = TextDiff::configure().ignore_whitespace(true).diff(text1, text2);
    println!("identical: {}", relaxed.is_identical());

    // Windows line endings against Unix ones
    let crlf = "first\r\nsecond\r\nthird\r\n";
    let lf = "first\nsecond changed\nthird\n";

    println!("\n=== Ignoring line endings ===");
    print!(
        "{}",
        TextDiff::configure()
            .ignore_line_endings(true)
            .unified_diff(crlf, lf)
    );

    let complex_text1 = "This is a longer text with multiple paragraphs.\nIt contains several lines that will be changed.\nSome lines will remain the same.\nOthers will be modified extensively.\n";
    let complex_text2 = "This is a longer text with multiple sections.\nIt has several lines that have been modified.\nSome lines will remain the same.\nNew lines are also added here.\nAnd more content at the end.\n";

    // Different levels of context
    println!("\n=== With 0 context lines ===");
    print!("{}", TextDiff::configure().context_lines(0).unified_diff(complex_text1, complex_text2));

    println!("\n=== With 2 context lines ===");
    print!("{}", TextDiff::configure().context_lines(2).unified_diff(complex_text1, complex_text2));

    // Combining multiple configuration options
    println!("\n=== Word granularity, ignoring whitespace ===");
    print!(
        "{}",
        TextDiff::configure()
            .granularity(DiffGranularity::Word)
            .ignore_whitespace(true)
            .context_lines(1)
            .unified_diff(complex_text1, complex_text2)
    );

    // A diff that is cancelled before it starts
    let token = CancellationToken::new();
    token.cancel();
    match TextDiff::configure().diff_cancellable(complex_text1, complex_text2, &token) {
        Ok(_) => println!("\ndiff finished"),
        Err(err) if err.is_cancelled() => println!("\n{err}"),
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
