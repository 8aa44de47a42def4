//! Navigation table and slug mapping.
//!
//! One static table declares every sidebar section, its label, its URL
//! slug, and its items. Link construction (label -> slug) and deep-link
//! resolution (slug -> section/page) both read this table, so the two
//! directions cannot drift apart.

use super::Page;

/// Top-level sidebar sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Section {
    Students,
    Attendance,
    Admissions,
    Quizzes,
    Assignments,
    Zoom,
    Results,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Students,
        Section::Attendance,
        Section::Admissions,
        Section::Quizzes,
        Section::Assignments,
        Section::Zoom,
        Section::Results,
    ];

    pub fn title(&self) -> &'static str {
        spec_for(*self).label
    }
}

/// One navigable item inside a section.
#[derive(Debug)]
pub struct ItemSpec {
    pub label: &'static str,
    /// Explicit slug; `None` falls back to `slugify(label)`.
    pub slug: Option<&'static str>,
    pub page: Page,
}

/// One sidebar section with its items.
#[derive(Debug)]
pub struct SectionSpec {
    pub section: Section,
    pub label: &'static str,
    /// Explicit slug; `None` falls back to `slugify(label)`.
    pub slug: Option<&'static str>,
    pub items: &'static [ItemSpec],
}

/// The navigation tree. Section slugs must be unique; item slugs must be
/// unique within their section.
pub static NAV: &[SectionSpec] = &[
    SectionSpec {
        section: Section::Students,
        label: "Students Information",
        slug: Some("students"),
        items: &[
            ItemSpec {
                label: "All Students",
                slug: None,
                page: Page::AllStudents,
            },
            ItemSpec {
                label: "Student Details",
                slug: None,
                page: Page::StudentDetail,
            },
        ],
    },
    SectionSpec {
        section: Section::Attendance,
        label: "Attendance",
        slug: None,
        items: &[
            ItemSpec {
                label: "Mark Attendance",
                slug: None,
                page: Page::MarkAttendance,
            },
            ItemSpec {
                label: "Attendance Report",
                slug: None,
                page: Page::AttendanceReport,
            },
        ],
    },
    SectionSpec {
        section: Section::Admissions,
        label: "New Admissions",
        slug: Some("admissions"),
        items: &[
            ItemSpec {
                label: "Admission List",
                slug: None,
                page: Page::AdmissionList,
            },
            ItemSpec {
                label: "Admission Details",
                slug: None,
                page: Page::AdmissionDetail,
            },
        ],
    },
    SectionSpec {
        section: Section::Quizzes,
        label: "Quizzes",
        slug: None,
        items: &[ItemSpec {
            label: "Quizzes & Tests",
            slug: Some("quiz-list"),
            page: Page::QuizList,
        }],
    },
    SectionSpec {
        section: Section::Assignments,
        label: "Assignments",
        slug: None,
        items: &[ItemSpec {
            label: "Assignment List",
            slug: None,
            page: Page::AssignmentList,
        }],
    },
    SectionSpec {
        section: Section::Zoom,
        label: "Zoom Classes",
        slug: Some("zoom"),
        items: &[
            ItemSpec {
                label: "Schedule Meeting",
                slug: None,
                page: Page::ScheduleMeeting,
            },
            ItemSpec {
                label: "Meeting List",
                slug: None,
                page: Page::MeetingList,
            },
        ],
    },
    SectionSpec {
        section: Section::Results,
        label: "Results",
        slug: None,
        items: &[ItemSpec {
            label: "Result List",
            slug: None,
            page: Page::ResultList,
        }],
    },
];

/// Generic slugification fallback: lowercase, `&` becomes "and",
/// runs of anything non-alphanumeric collapse to a single hyphen,
/// leading/trailing hyphens stripped.
pub fn slugify(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut pending_hyphen = false;
    let replaced = label.to_lowercase().replace('&', " and ");
    for ch in replaced.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(ch);
        } else {
            pending_hyphen = true;
        }
    }
    out
}

pub fn spec_for(section: Section) -> &'static SectionSpec {
    NAV.iter()
        .find(|spec| spec.section == section)
        .expect("every section is declared in NAV")
}

pub fn section_slug(section: Section) -> String {
    let spec = spec_for(section);
    spec.slug
        .map(str::to_string)
        .unwrap_or_else(|| slugify(spec.label))
}

pub fn item_slug(item: &ItemSpec) -> String {
    item.slug
        .map(str::to_string)
        .unwrap_or_else(|| slugify(item.label))
}

/// Reverse lookup used by the sidebar when the route changes.
pub fn section_by_slug(slug: &str) -> Option<Section> {
    NAV.iter()
        .find(|spec| section_slug(spec.section) == slug)
        .map(|spec| spec.section)
}

/// Resolve a `/dashboard/<section>/<item>` pair to its page.
pub fn page_for(section_slug_str: &str, item_slug_str: &str) -> Option<Page> {
    let section = section_by_slug(section_slug_str)?;
    spec_for(section)
        .items
        .iter()
        .find(|item| item_slug(item) == item_slug_str)
        .map(|item| item.page)
}

/// First item of a section, used when a deep link names only the section.
pub fn landing_page(section: Section) -> Option<Page> {
    spec_for(section).items.first().map(|item| item.page)
}

/// Section and item spec that navigate to the given page.
pub fn locate(page: Page) -> Option<(Section, &'static ItemSpec)> {
    for spec in NAV {
        for item in spec.items {
            if item.page == page {
                return Some((spec.section, item));
            }
        }
    }
    None
}

/// Build a dashboard link from human-readable labels. Known labels use
/// their declared slug; anything else falls back to generic
/// slugification, so callers can construct links for sections that have
/// no override entry.
pub fn link_path(section_label: &str, item_label: &str) -> String {
    let section_part = NAV
        .iter()
        .find(|spec| spec.label == section_label)
        .map(|spec| {
            spec.slug
                .map(str::to_string)
                .unwrap_or_else(|| slugify(spec.label))
        })
        .unwrap_or_else(|| slugify(section_label));
    let item_part = NAV
        .iter()
        .flat_map(|spec| spec.items.iter())
        .find(|item| item.label == item_label)
        .map(item_slug)
        .unwrap_or_else(|| slugify(item_label));
    format!("/dashboard/{section_part}/{item_part}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basics() {
        assert_eq!(slugify("Attendance"), "attendance");
        assert_eq!(slugify("Mark Attendance"), "mark-attendance");
        assert_eq!(slugify("Foo & Bar"), "foo-and-bar");
        assert_eq!(slugify("  spaced   out  "), "spaced-out");
        assert_eq!(slugify("Results!"), "results");
    }

    #[test]
    fn test_declared_links() {
        assert_eq!(
            link_path("Students Information", "Student Details"),
            "/dashboard/students/student-details"
        );
        assert_eq!(
            link_path("Zoom Classes", "Schedule Meeting"),
            "/dashboard/zoom/schedule-meeting"
        );
        // Item override wins over generic slugification.
        assert_eq!(
            link_path("Quizzes", "Quizzes & Tests"),
            "/dashboard/quizzes/quiz-list"
        );
    }

    #[test]
    fn test_unknown_labels_fall_back_to_slugify() {
        assert_eq!(
            link_path("Foo & Bar", "Baz Qux"),
            "/dashboard/foo-and-bar/baz-qux"
        );
    }

    #[test]
    fn test_every_section_has_a_reverse_entry() {
        // Every section that produces links must resolve back, or the
        // sidebar cannot auto-expand on deep links.
        for spec in NAV {
            let slug = section_slug(spec.section);
            assert_eq!(section_by_slug(&slug), Some(spec.section), "slug {slug}");
        }
    }

    #[test]
    fn test_slugs_are_unique() {
        let mut seen = std::collections::BTreeSet::new();
        for spec in NAV {
            assert!(seen.insert(section_slug(spec.section)));
            let mut items = std::collections::BTreeSet::new();
            for item in spec.items {
                assert!(items.insert(item_slug(item)));
            }
        }
    }

    #[test]
    fn test_page_for_roundtrip() {
        for spec in NAV {
            for item in spec.items {
                let resolved = page_for(&section_slug(spec.section), &item_slug(item));
                assert_eq!(resolved, Some(item.page));
            }
        }
    }
}
