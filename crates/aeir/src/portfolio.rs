//! Portfolio projects and the category filter over them.

/// Project category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    RealEstate,
    Events,
    Commercial,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::RealEstate => "Real Estate",
            Category::Events => "Events",
            Category::Commercial => "Commercial",
        }
    }
}

/// A showcased shoot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Project {
    pub title: &'static str,
    pub category: Category,
}

pub const PROJECTS: &[Project] = &[
    Project {
        title: "Luxury Villa",
        category: Category::RealEstate,
    },
    Project {
        title: "Island Wedding",
        category: Category::Events,
    },
    Project {
        title: "Urban Landscape",
        category: Category::Commercial,
    },
];

/// Active filter: everything, or a single category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Only(Category),
}

impl Filter {
    /// Filters in the order they are offered.
    pub const ALL: [Filter; 4] = [
        Filter::All,
        Filter::Only(Category::RealEstate),
        Filter::Only(Category::Events),
        Filter::Only(Category::Commercial),
    ];

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Only(category) => category.label(),
        }
    }

    /// The next filter, wrapping back to `All`.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn matches(self, project: &Project) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(category) => project.category == category,
        }
    }

    /// Projects passing this filter, in catalogue order.
    pub fn projects(self) -> impl Iterator<Item = &'static Project> {
        PROJECTS.iter().filter(move |p| self.matches(p))
    }
}
