use std::collections::HashMap;

fn process_order(_order_id: &str) -> Result<(), std::io::Error> {
    Err(std::io::Error::new(
        std::io::ErrorKind::TimedOut,
        "simulated database connection timeout",
    ))
}

fn main() {
    let mut ctx = HashMap::new();
    ctx.insert("userID".to_string(), "12345".to_string());
    ctx.insert("requestID".to_string(), "req-abc-123".to_string());

    if let Err(err) = process_order("order-456") {
        zlog::error()
            .context(&ctx, ["userID", "requestID"])
            .segment("order", &["process"])
            .err(&err)
            .with_source()
            .with_call_stack()
            .msgf(format_args!("taskId: {}", "task-789"));
    }

    zlog::info()
        .context(&ctx, ["userID", "requestID"])
        .segment("user", &["profile", "update"])
        .message("profile updated");
}
