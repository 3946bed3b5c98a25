//! Static catalog of the tutorial series.

use serde::{Deserialize, Serialize};

pub const TUTORIAL_COUNT: usize = 17;

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TutorialLevel {
    Foundations,
    CoreWorkflows,
    Advanced,
    Expert,
}

impl TutorialLevel {
    pub const ALL: [TutorialLevel; 4] = [
        TutorialLevel::Foundations,
        TutorialLevel::CoreWorkflows,
        TutorialLevel::Advanced,
        TutorialLevel::Expert,
    ];

    pub fn number(self) -> u8 {
        match self {
            TutorialLevel::Foundations => 1,
            TutorialLevel::CoreWorkflows => 2,
            TutorialLevel::Advanced => 3,
            TutorialLevel::Expert => 4,
        }
    }

    pub fn label(self) -> String {
        format!("LEVEL {}", self.number())
    }

    pub fn tag(self) -> &'static str {
        match self {
            TutorialLevel::Foundations => "Foundations",
            TutorialLevel::CoreWorkflows => "Core Workflows",
            TutorialLevel::Advanced => "Advanced",
            TutorialLevel::Expert => "Expert",
        }
    }

    /// Accent color as `#rrggbb`.
    pub fn color(self) -> &'static str {
        match self {
            TutorialLevel::Foundations => "#3fb950",
            TutorialLevel::CoreWorkflows => "#58a6ff",
            TutorialLevel::Advanced => "#d29922",
            TutorialLevel::Expert => "#f85149",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tutorial {
    pub id: u32,
    pub title: &'static str,
    pub level: TutorialLevel,
    pub duration: &'static str,
    pub description: &'static str,
}

const fn tutorial(
    id: u32,
    title: &'static str,
    level: TutorialLevel,
    duration: &'static str,
    description: &'static str,
) -> Tutorial {
    Tutorial {
        id,
        title,
        level,
        duration,
        description,
    }
}

pub static TUTORIALS: [Tutorial; TUTORIAL_COUNT] = [
    tutorial(
        1,
        "Getting Started \u{2014} Intro to Claude Code",
        TutorialLevel::Foundations,
        "30-45 min",
        "Install Claude Code, run your first commands, and understand the mental model of working with an agentic coding tool.",
    ),
    tutorial(
        2,
        "CLAUDE.md \u{2014} Teaching Claude About Your Project",
        TutorialLevel::Foundations,
        "30-45 min",
        "Write the single most impactful file for Claude Code productivity. Learn to create, structure, and maintain your project's CLAUDE.md.",
    ),
    tutorial(
        3,
        "Project Onboarding \u{2014} Learning a Codebase",
        TutorialLevel::Foundations,
        "30-45 min",
        "Use Claude Code as your onboarding partner when joining a new project or inheriting legacy code.",
    ),
    tutorial(
        4,
        "The Define \u{2192} Plan \u{2192} Iterate Workflow",
        TutorialLevel::CoreWorkflows,
        "30-45 min",
        "Master the foundational workflow pattern that makes AI-assisted development productive and low-risk.",
    ),
    tutorial(
        5,
        "Rules, Commands, Skills & Hooks",
        TutorialLevel::CoreWorkflows,
        "35-50 min",
        "Learn Claude Code's four building blocks for extensibility and customization.",
    ),
    tutorial(
        6,
        "Prompt Engineering for Claude Code",
        TutorialLevel::CoreWorkflows,
        "30-45 min",
        "Write prompts that leverage Claude Code's agentic capabilities effectively.",
    ),
    tutorial(
        7,
        "Code Refactoring with Claude Code",
        TutorialLevel::CoreWorkflows,
        "30-45 min",
        "Perform safe, coordinated multi-file refactors with AI assistance.",
    ),
    tutorial(
        8,
        "Handling Documentation",
        TutorialLevel::CoreWorkflows,
        "25-35 min",
        "Generate and maintain documentation as a first-class development artifact.",
    ),
    tutorial(
        9,
        "Token Optimization & Context Management",
        TutorialLevel::Advanced,
        "30-45 min",
        "Master context management strategies for productive all-day sessions.",
    ),
    tutorial(
        10,
        "AI-Native Development Mindset",
        TutorialLevel::Advanced,
        "30-45 min",
        "Design your workflow around what agents do best \u{2014} move from AI-assisted to AI-native.",
    ),
    tutorial(
        11,
        "Safe Delivery Pipelines",
        TutorialLevel::Advanced,
        "35-50 min",
        "Integrate Claude Code into Git workflows for safe, reviewable, auditable delivery.",
    ),
    tutorial(
        12,
        "MCP Servers",
        TutorialLevel::Advanced,
        "35-50 min",
        "Connect Claude Code to external tools and data using the Model Context Protocol.",
    ),
    tutorial(
        13,
        "Subagents & AGENTS.md",
        TutorialLevel::Advanced,
        "35-50 min",
        "Create specialized AI assistants with their own contexts and tool restrictions.",
    ),
    tutorial(
        14,
        "Supervisor Architectures",
        TutorialLevel::Expert,
        "40-55 min",
        "Build multi-stage development pipelines with specialized subagents and quality gates.",
    ),
    tutorial(
        15,
        "Agent Teams",
        TutorialLevel::Expert,
        "40-55 min",
        "Enable direct inter-agent communication for collaborative multi-agent builds.",
    ),
    tutorial(
        16,
        "Ralph \u{2014} Autonomous Dev Loops",
        TutorialLevel::Expert,
        "40-55 min",
        "Build fully autonomous development loops with self-verification and minimal human intervention.",
    ),
    tutorial(
        17,
        "Plugins & Marketplace",
        TutorialLevel::Expert,
        "30-45 min",
        "Package and distribute your Claude Code extensions as reusable plugins.",
    ),
];

pub fn tutorial_by_id(id: u32) -> Option<&'static Tutorial> {
    TUTORIALS.iter().find(|tutorial| tutorial.id == id)
}

/// Tutorials of `level`, in catalog order.
pub fn tutorials_in_level(level: TutorialLevel) -> impl Iterator<Item = &'static Tutorial> {
    TUTORIALS.iter().filter(move |tutorial| tutorial.level == level)
}

/// Parse a tutorial link such as `#tutorial-4`, `tutorial-4` or `4`.
/// Ids outside the catalog are rejected.
pub fn parse_deep_link(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('#').unwrap_or(trimmed);
    let number = trimmed.strip_prefix("tutorial-").unwrap_or(trimmed);
    let id = number.parse::<u32>().ok()?;
    tutorial_by_id(id).map(|tutorial| tutorial.id)
}

/// Deep-link fragment for `id`. The first tutorial has no fragment.
pub fn deep_link_for(id: u32) -> Option<String> {
    (id > 1).then(|| format!("#tutorial-{id}"))
}
