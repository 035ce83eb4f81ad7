use core_items::{ItemStore, PrioritySet};
use core_match::{MatchMode, Matcher};
use core_render::{MenuShape, Palette, RenderEngine, Role, Viewport};
use core_state::{HistoryLog, Layout, MenuState};
use core_text::{CaseRule, CellWidth};
use pretty_assertions::assert_eq;

fn state_with(items: ItemStore) -> MenuState {
    MenuState::new(
        items,
        Matcher::new(MatchMode::Fuzzy, CaseRule::Sensitive),
        Layout::Strip { budget: 1 },
        HistoryLog::disabled(),
        Box::new(CellWidth::default()),
    )
}

fn state(lines: &[&str]) -> MenuState {
    state_with(ItemStore::from_lines(
        lines.iter().copied(),
        &PrioritySet::default(),
        CaseRule::Sensitive,
    ))
}

fn fit(engine: &RenderEngine, s: &mut MenuState, size: (u16, u16), shape: MenuShape) -> Viewport {
    let vp = engine.viewport(size, shape, s);
    s.set_layout(vp.layout);
    vp
}

fn grid(lines: u32, columns: u32) -> MenuShape {
    MenuShape { lines, columns }
}

#[test]
fn strip_row_layout() {
    let engine = RenderEngine::new(Palette::default(), Some("run:".into()), false);
    let mut s = state(&["alpha", "beta", "gamma"]);
    let vp = fit(&engine, &mut s, (60, 24), MenuShape::default());
    let frame = engine.build_frame(&s, &vp);

    let expected = format!(" run: {:7}{:3} alpha  beta  gamma {:19} 3/3 ", "", "", "");
    assert_eq!(frame.row_text(0), expected);
    assert_eq!(frame.cell(1, 0).unwrap().role, Role::Selected);
    assert_eq!(frame.cell(17, 0).unwrap().role, Role::Selected);
    assert_eq!(frame.cell(24, 0).unwrap().role, Role::Normal);
    assert_eq!(frame.cursor_position(), Some((7, 0)));
}

#[test]
fn strip_page_markers() {
    let engine = RenderEngine::new(Palette::default(), None, false);
    let names: Vec<String> = (0..20).map(|i| format!("item{i:02}")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let mut s = state(&refs);
    let vp = fit(&engine, &mut s, (40, 24), MenuShape::default());

    let first = engine.build_frame(&s, &vp).row_text(0);
    assert!(first.contains('>'), "row: {first:?}");
    assert!(!first.contains('<'), "row: {first:?}");
    assert!(first.trim_end().ends_with("3/20"), "row: {first:?}");

    assert!(s.page_next());
    let second = engine.build_frame(&s, &vp).row_text(0);
    assert!(second.contains('<'), "row: {second:?}");
    assert!(second.contains("item03"), "row: {second:?}");
}

#[test]
fn grid_is_column_major() {
    let engine = RenderEngine::new(Palette::default(), None, false);
    let mut s = state(&["one", "two", "three", "four", "five"]);
    let vp = fit(&engine, &mut s, (40, 10), grid(2, 2));
    assert_eq!(vp.height, 3);
    let frame = engine.build_frame(&s, &vp);
    assert_eq!(frame.row_text(1), format!("{:<20}{:<20}", " one", " three"));
    assert_eq!(frame.row_text(2), format!("{:<20}{:<20}", " two", " four"));
    assert!(frame.row_text(0).trim_end().ends_with("4/5"));
}

#[test]
fn password_query_is_masked() {
    let engine = RenderEngine::new(Palette::default(), None, true);
    let mut s = state_with(ItemStore::new());
    let vp = fit(&engine, &mut s, (40, 24), MenuShape::default());
    s.set_query("abc");
    let row = engine.build_frame(&s, &vp).row_text(0);
    assert!(row.starts_with(" ..."), "row: {row:?}");
    assert!(!row.contains("abc"));
}

#[test]
fn matched_characters_use_highlight_roles() {
    let engine = RenderEngine::new(Palette::default(), None, false);
    let mut s = state(&["apple", "grape"]);
    let vp = fit(&engine, &mut s, (30, 10), grid(3, 1));
    s.set_query("ae");
    let frame = engine.build_frame(&s, &vp);
    let role = |x, y| frame.cell(x, y).unwrap().role;
    // The tighter span ranks first.
    assert_eq!(frame.row_text(1).trim_end(), " grape");
    assert_eq!(role(1, 1), Role::Selected);
    assert_eq!(role(3, 1), Role::SelectedHighlight);
    assert_eq!(role(5, 1), Role::SelectedHighlight);
    assert_eq!(frame.row_text(2).trim_end(), " apple");
    assert_eq!(role(1, 2), Role::NormalHighlight);
    assert_eq!(role(2, 2), Role::Normal);
    assert_eq!(role(5, 2), Role::NormalHighlight);
}

#[test]
fn output_and_priority_roles() {
    let engine = RenderEngine::new(Palette::default(), None, false);
    let items = ItemStore::from_lines(
        ["x", "y", "z"],
        &PrioritySet::parse("z"),
        CaseRule::Sensitive,
    );
    let mut s = state_with(items);
    let vp = fit(&engine, &mut s, (30, 10), grid(3, 1));
    let sel = s.window().sel.unwrap();
    assert!(s.toggle_selection());
    assert!(s.down());
    let frame = engine.build_frame(&s, &vp);
    let role_of = |text: &str| {
        (1..=3)
            .find(|&y| frame.row_text(y).trim() == text)
            .map(|y| frame.cell(1, y).unwrap().role)
    };
    let sel_text = s.items().text(sel).unwrap().to_owned();
    assert_eq!(role_of(&sel_text), Some(Role::Output));
    let now = s.highlighted().unwrap().text.clone();
    assert_eq!(role_of(&now), Some(Role::Selected));
    if sel_text != "z" && now != "z" {
        assert_eq!(role_of("z"), Some(Role::Priority));
    }
}

#[test]
fn render_writes_escape_sequences_and_text() {
    let mut engine = RenderEngine::new(Palette::default(), Some(">".into()), false);
    let mut s = state(&["alpha"]);
    let vp = fit(&engine, &mut s, (30, 5), MenuShape::default());
    let mut out = Vec::new();
    engine.render(&mut out, &s, &vp).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("alpha"));
    assert!(text.contains("\u{1b}["));
}
