// ============================================================
// HEADER CLASSIFIER
// ============================================================
// Assign semantic roles to spreadsheet columns from their headers

use once_cell::sync::Lazy;

use crate::domain::locale::{Locale, MatchTerm};
use crate::domain::table::{CellValue, ColumnRole, ColumnRoleMap};

/// Locale-tagged match vocabulary, one term set per rule.
///
/// Kept as an explicit table so the priority semantics
/// (content > link guard > userName > userId > date > location)
/// live in `classify` and not in the ordering of ad-hoc literals.
struct RoleLexicon {
    /// Headers that ARE the comment-content column, matched exactly.
    content_exact: Vec<MatchTerm>,
    /// Substrings meaning "content"/"comment".
    content: Vec<MatchTerm>,
    /// Substrings meaning "url"/"link"; such columns never become
    /// userName or userId.
    link_like: Vec<MatchTerm>,
    /// Substrings meaning "commenter"/"nickname"/"name".
    user_name: Vec<MatchTerm>,
    /// Substrings meaning "platform id"/"id"/"uid"/"code"; doubles as the
    /// ID-like guard that keeps ID columns out of content and userName.
    id_like: Vec<MatchTerm>,
    /// Substrings meaning "time"/"date".
    date: Vec<MatchTerm>,
    /// Substrings meaning "region"/"location".
    location: Vec<MatchTerm>,
}

static LEXICON: Lazy<RoleLexicon> = Lazy::new(|| RoleLexicon {
    content_exact: vec![
        MatchTerm::new(Locale::Zh, "评论内容"),
        MatchTerm::new(Locale::En, "comment content"),
    ],
    content: vec![
        MatchTerm::new(Locale::Zh, "内容"),
        MatchTerm::new(Locale::Zh, "评论"),
        MatchTerm::new(Locale::Zh, "留言"),
        MatchTerm::new(Locale::En, "content"),
        MatchTerm::new(Locale::En, "comment"),
        MatchTerm::new(Locale::En, "message"),
    ],
    link_like: vec![
        MatchTerm::new(Locale::Zh, "链接"),
        MatchTerm::new(Locale::Zh, "主页"),
        MatchTerm::new(Locale::Zh, "网址"),
        MatchTerm::new(Locale::En, "link"),
        MatchTerm::new(Locale::En, "url"),
        MatchTerm::new(Locale::En, "homepage"),
    ],
    user_name: vec![
        MatchTerm::new(Locale::Zh, "昵称"),
        MatchTerm::new(Locale::Zh, "用户名"),
        MatchTerm::new(Locale::Zh, "姓名"),
        MatchTerm::new(Locale::Zh, "名称"),
        MatchTerm::new(Locale::Zh, "用户"),
        MatchTerm::new(Locale::Zh, "评论人"),
        MatchTerm::new(Locale::En, "nickname"),
        MatchTerm::new(Locale::En, "username"),
        MatchTerm::new(Locale::En, "user name"),
        MatchTerm::new(Locale::En, "name"),
        MatchTerm::new(Locale::En, "commenter"),
    ],
    id_like: vec![
        MatchTerm::new(Locale::Zh, "抖音号"),
        MatchTerm::new(Locale::Zh, "快手号"),
        MatchTerm::new(Locale::Zh, "账号"),
        MatchTerm::new(Locale::Zh, "编号"),
        MatchTerm::new(Locale::Zh, "序号"),
        MatchTerm::new(Locale::En, "id"),
        MatchTerm::new(Locale::En, "uid"),
        MatchTerm::new(Locale::En, "code"),
    ],
    date: vec![
        MatchTerm::new(Locale::Zh, "时间"),
        MatchTerm::new(Locale::Zh, "日期"),
        MatchTerm::new(Locale::En, "time"),
        MatchTerm::new(Locale::En, "date"),
    ],
    location: vec![
        MatchTerm::new(Locale::Zh, "地区"),
        MatchTerm::new(Locale::Zh, "地域"),
        MatchTerm::new(Locale::Zh, "位置"),
        MatchTerm::new(Locale::Zh, "城市"),
        MatchTerm::new(Locale::En, "region"),
        MatchTerm::new(Locale::En, "location"),
        MatchTerm::new(Locale::En, "area"),
        MatchTerm::new(Locale::En, "city"),
    ],
});

fn contains_any(header: &str, terms: &[MatchTerm]) -> bool {
    terms.iter().any(|t| header.contains(t.term))
}

fn equals_any(header: &str, terms: &[MatchTerm]) -> bool {
    terms.iter().any(|t| header == t.term)
}

/// Assign at most one column index to each semantic role.
///
/// Single left-to-right pass; per column the rules run as an exclusive
/// first-match-wins chain in fixed priority, and each role keeps its first
/// assignment. Non-string header cells are stringified before matching.
pub fn classify(headers: &[CellValue]) -> ColumnRoleMap {
    let mut map = ColumnRoleMap::default();

    for (index, cell) in headers.iter().enumerate() {
        let header = cell.to_text().trim().to_lowercase();
        if header.is_empty() {
            continue;
        }

        let id_like = contains_any(&header, &LEXICON.id_like);
        let link_like = contains_any(&header, &LEXICON.link_like);

        if !map.is_assigned(ColumnRole::Content)
            && (equals_any(&header, &LEXICON.content_exact)
                || (!id_like && contains_any(&header, &LEXICON.content)))
        {
            map.set(ColumnRole::Content, index);
        } else if !map.is_assigned(ColumnRole::UserName)
            && !link_like
            && !id_like
            && contains_any(&header, &LEXICON.user_name)
        {
            map.set(ColumnRole::UserName, index);
        } else if !map.is_assigned(ColumnRole::UserId)
            && !link_like
            && contains_any(&header, &LEXICON.id_like)
        {
            map.set(ColumnRole::UserId, index);
        } else if !map.is_assigned(ColumnRole::Date) && contains_any(&header, &LEXICON.date) {
            map.set(ColumnRole::Date, index);
        } else if !map.is_assigned(ColumnRole::Location) && contains_any(&header, &LEXICON.location)
        {
            map.set(ColumnRole::Location, index);
        }
    }

    apply_positional_fallback(headers, &mut map);
    map
}

/// Recover the common "Content, User, ID, ..." positional export layout.
///
/// When no header carried a content signal, column 0 is taken as content
/// provided it is neither ID-like nor link-like. When content sits at
/// column 0, unassigned userName/userId default to columns 1/2, with the
/// same guards an explicit match would have applied.
fn apply_positional_fallback(headers: &[CellValue], map: &mut ColumnRoleMap) {
    let column_count = headers.len();

    if !map.has_content() && column_count > 0 {
        let first = headers[0].to_text().trim().to_lowercase();
        if !first.is_empty()
            && !contains_any(&first, &LEXICON.id_like)
            && !contains_any(&first, &LEXICON.link_like)
        {
            map.set(ColumnRole::Content, 0);
        }
    }

    if map.content != Some(0) {
        return;
    }

    if !map.is_assigned(ColumnRole::UserName) && column_count >= 2 && !column_taken(map, 1) {
        let header = headers[1].to_text().trim().to_lowercase();
        if !contains_any(&header, &LEXICON.id_like) && !contains_any(&header, &LEXICON.link_like) {
            map.set(ColumnRole::UserName, 1);
        }
    }

    if !map.is_assigned(ColumnRole::UserId) && column_count >= 3 && !column_taken(map, 2) {
        let header = headers[2].to_text().trim().to_lowercase();
        if !contains_any(&header, &LEXICON.link_like) {
            map.set(ColumnRole::UserId, 2);
        }
    }
}

/// Whether any role already claimed the given column.
fn column_taken(map: &ColumnRoleMap, index: usize) -> bool {
    [map.content, map.user_name, map.user_id, map.date, map.location]
        .iter()
        .any(|slot| *slot == Some(index))
}
