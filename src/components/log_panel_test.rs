use super::*;

fn plain(lines: &[&str]) -> Vec<LogLine> {
    lines.iter().map(|l| LogLine::from(*l)).collect()
}

#[test]
fn short_log_renders_every_line_in_order() {
    let window = LogWindow::of(&plain(&["a", "b"]), LOG_RENDER_CAP);
    assert_eq!(window.hidden, 0);
    assert_eq!(
        window.rows,
        vec![("pos:0".to_owned(), "a".to_owned()), ("pos:1".to_owned(), "b".to_owned())]
    );
}

#[test]
fn long_log_keeps_the_tail_and_counts_the_rest() {
    let lines: Vec<String> = (0..7).map(|i| format!("line {i}")).collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let window = LogWindow::of(&plain(&refs), 3);

    assert_eq!(window.hidden, 4);
    let texts: Vec<&str> = window.rows.iter().map(|(_, t)| t.as_str()).collect();
    assert_eq!(texts, vec!["line 4", "line 5", "line 6"]);
    assert_eq!(window.rows[0].0, "pos:4");
}

#[test]
fn keyed_lines_use_backend_ids() {
    let lines = vec![
        LogLine::Keyed { id: "17".into(), text: "bought".to_owned() },
        LogLine::from("plain"),
    ];
    let window = LogWindow::of(&lines, LOG_RENDER_CAP);
    assert_eq!(window.rows[0].0, "id:17");
    assert_eq!(window.rows[1].0, "pos:1");
}

#[test]
fn empty_log_renders_nothing() {
    assert_eq!(LogWindow::of(&[], LOG_RENDER_CAP), LogWindow::default());
}

#[test]
fn repeated_backend_ids_get_distinct_keys() {
    let repeated = || LogLine::Keyed { id: "9".into(), text: "sold".to_owned() };
    let window = LogWindow::of(&[repeated(), repeated(), repeated()], LOG_RENDER_CAP);
    let keys: Vec<&str> = window.rows.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["id:9", "id:9#2", "id:9#3"]);
}
