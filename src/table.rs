use comfy_table::{modifiers, presets, ContentArrangement, Table};
use terminal_size::{terminal_size, Width};

use crate::models::UserRecord;
use crate::store::Page;

pub const USER_COLUMNS: [&str; 6] = ["#", "Full name", "Email", "Username", "Role", "Actions"];

fn base_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }
    table
}

/// Row cells in column order; the actions cell names the commands for the row.
pub fn user_row(record: &UserRecord) -> Vec<String> {
    vec![
        record.id.to_string(),
        record.full_name.clone(),
        record.email.clone(),
        record.username.clone(),
        record.role.name.clone(),
        format!("edit {0} | delete {0}", record.id),
    ]
}

pub fn users_table(records: &[UserRecord]) -> Table {
    let mut table = base_table();
    table.set_header(USER_COLUMNS.to_vec());
    for r in records {
        table.add_row(user_row(r));
    }
    table
}

/// Footer line describing the page position.
pub fn page_summary(page: &Page<'_>) -> String {
    if page.current_page == 0 {
        format!("Showing all {} users", page.total_count)
    } else {
        format!(
            "Page {} of {} | Showing {} of {} total users",
            page.current_page,
            page.total_pages,
            page.items.len(),
            page.total_count
        )
    }
}

/// Two-column view of a draft, password masked.
pub fn draft_table(draft: &UserRecord) -> Table {
    let mut table = base_table();
    table.set_header(vec!["Field", "Value"]);
    let id = if draft.is_new() { "(new)".to_string() } else { draft.id.to_string() };
    let password = "*".repeat(draft.password.chars().count());
    let role = if draft.role.name.is_empty() {
        String::new()
    } else {
        format!("{}:{}", draft.role.id, draft.role.name)
    };
    table.add_row(vec!["id".to_string(), id]);
    table.add_row(vec!["fullName".to_string(), draft.full_name.clone()]);
    table.add_row(vec!["email".to_string(), draft.email.clone()]);
    table.add_row(vec!["username".to_string(), draft.username.clone()]);
    table.add_row(vec!["password".to_string(), password]);
    table.add_row(vec!["role".to_string(), role]);
    table
}
