//! HTML rendering for the web shell
//!
//! The page shell is an embedded template with `{{placeholder}}`
//! substitution; the dynamic fragments are built with `write!` into plain
//! strings.

use crate::core::models::Student;
use crate::core::stats::RosterStats;
use std::fmt::Write as _;

/// Embedded page template
const LAYOUT_TEMPLATE: &str = include_str!("templates/layout.html");

/// Escape text for safe interpolation into HTML
#[must_use]
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Render the page shell around `content`, with an optional alert banner
#[must_use]
pub fn render_layout(title: &str, content: &str, msg: &str) -> String {
    let alert = if msg.is_empty() {
        String::new()
    } else {
        format!("<div class=\"alert\">{}</div>", escape_html(msg))
    };

    LAYOUT_TEMPLATE
        .replace("{{title}}", &escape_html(title))
        .replace("{{alert}}", &alert)
        .replace("{{content}}", content)
}

/// Build the degree bar chart rows
fn degree_chart(stats: &RosterStats) -> String {
    if stats.degrees.is_empty() {
        return "<div class=\"muted\">No degree data</div>".to_string();
    }

    let max_count = stats
        .degrees
        .iter()
        .map(|d| d.count)
        .max()
        .unwrap_or(1)
        .max(1);

    let mut html = String::from("<div class=\"chart\">");
    for entry in &stats.degrees {
        let width = entry.count * 100 / max_count;
        let _ = write!(
            html,
            "<div class=\"chart-row\">\
             <div class=\"chart-label\">{}</div>\
             <div class=\"bar-wrap\"><div class=\"bar\" style=\"--w:{width}%\"></div></div>\
             <div class=\"chart-count\">{}</div>\
             </div>",
            escape_html(&entry.degree),
            entry.count
        );
    }
    html.push_str("</div>");
    html
}

/// Build the degree count table rows
fn degree_rows(stats: &RosterStats) -> String {
    if stats.degrees.is_empty() {
        return "<tr><td colspan='2' class='muted'>No data</td></tr>".to_string();
    }
    let mut html = String::new();
    for entry in &stats.degrees {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td></tr>",
            escape_html(&entry.degree),
            entry.count
        );
    }
    html
}

/// Build the student table rows with edit/delete actions
fn student_rows(students: &[Student]) -> String {
    if students.is_empty() {
        return "<tr><td colspan='5' class='muted'>No students found.</td></tr>".to_string();
    }

    let mut html = String::new();
    for s in students {
        let sid = escape_html(&s.id);
        let _ = write!(
            html,
            "<tr>\
             <td><span class=\"badge\">{sid}</span></td>\
             <td>{}</td>\
             <td>{}</td>\
             <td>{}</td>\
             <td><div class=\"actions\">\
             <a class=\"btn primary\" href=\"/edit/{sid}\">Edit</a>\
             <a class=\"btn danger\" href=\"/delete/{sid}\" \
             onclick=\"return confirm('Delete this student?')\">Delete</a>\
             </div></td>\
             </tr>",
            escape_html(&s.name),
            s.age,
            escape_html(&s.degree)
        );
    }
    html
}

/// Build the home page content: add form, search, stats, chart, and table
#[must_use]
pub fn home_content(students: &[Student], stats: &RosterStats, query: &str) -> String {
    let mut content = String::from("<div class=\"grid\">");

    // Add-student card
    content.push_str(
        "<div class=\"card\">\
         <h2>Add Student</h2>\
         <form method=\"post\" action=\"/add\">\
         <div class=\"row two\">\
         <div><label>Student ID (unique)</label>\
         <input name=\"id\" placeholder=\"e.g. 1001\" required></div>\
         <div><label>Name</label>\
         <input name=\"name\" placeholder=\"e.g. Amy Chen\" required></div>\
         </div>\
         <div class=\"row two\">\
         <div><label>Age</label>\
         <input name=\"age\" type=\"number\" min=\"0\" max=\"120\" placeholder=\"e.g. 18\"></div>\
         <div><label>Degree</label>\
         <input name=\"degree\" placeholder=\"e.g. Computing (AI)\"></div>\
         </div>\
         <div class=\"btns\"><button class=\"btn ok\" type=\"submit\">Add Student</button></div>\
         <p class=\"muted\">Tip: Student ID must be unique.</p>\
         </form></div>",
    );

    // Roster card
    let _ = write!(
        content,
        "<div class=\"card\"><h2>Students</h2>\
         <form method=\"get\" action=\"/\">\
         <div class=\"row two\">\
         <div><label>Search (Name / ID / Degree)</label>\
         <input name=\"q\" placeholder=\"Type to search...\" value=\"{}\"></div>\
         <div class=\"btns\">\
         <button class=\"btn primary\" type=\"submit\">Search</button>\
         <a class=\"btn\" href=\"/\">Clear</a>\
         </div></div></form>\
         <div class=\"btns\"><a class=\"btn ok\" href=\"/export.csv\">Export CSV</a></div>\
         <div class=\"row two\">\
         <div class=\"badge\">Total Students: {}</div>\
         <div class=\"badge\">Avg Age: {} | Min: {} | Max: {}</div>\
         </div>\
         <div class=\"muted\"><b>Students by Degree</b></div>\
         {}\
         <table><thead><tr><th>Degree</th><th>Count</th></tr></thead>\
         <tbody>{}</tbody></table>\
         <table><thead><tr><th>ID</th><th>Name</th><th>Age</th><th>Degree</th>\
         <th>Actions</th></tr></thead>\
         <tbody>{}</tbody></table>\
         </div>",
        escape_html(query),
        stats.total,
        stats.avg_age,
        stats.min_age,
        stats.max_age,
        degree_chart(stats),
        degree_rows(stats),
        student_rows(students)
    );

    content.push_str("</div>");
    content
}

/// Build the edit form for one record
#[must_use]
pub fn edit_content(student: &Student) -> String {
    let sid = escape_html(&student.id);
    format!(
        "<div class=\"card narrow\">\
         <h2>Edit Student</h2>\
         <p class=\"muted\"><b>ID:</b> {sid}</p>\
         <form method=\"post\" action=\"/edit/{sid}\">\
         <div class=\"row two\">\
         <div><label>Name</label>\
         <input name=\"name\" value=\"{}\"></div>\
         <div><label>Age</label>\
         <input name=\"age\" type=\"number\" min=\"0\" max=\"120\" value=\"{}\"></div>\
         </div>\
         <div class=\"row\">\
         <div><label>Degree</label>\
         <input name=\"degree\" value=\"{}\"></div>\
         </div>\
         <p class=\"muted\">Leave a field blank to keep its current value.</p>\
         <div class=\"btns\">\
         <button class=\"btn ok\" type=\"submit\">Save Changes</button>\
         <a class=\"btn\" href=\"/\">Cancel</a>\
         </div></form></div>",
        escape_html(&student.name),
        student.age,
        escape_html(&student.degree)
    )
}
