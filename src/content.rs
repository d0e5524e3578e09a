//! Static screen content
//!
//! Text for the Home info cards and the About profile. The profile can be
//! replaced from the `[about]` table of the config file.

use serde::{Deserialize, Serialize};

/// An expandable card on the Home screen
#[derive(Debug, Clone, Copy)]
pub struct InfoCard {
    pub icon: &'static str,
    pub title: &'static str,
    pub text: &'static str,
}

pub const HOME_TITLE: &str = "International Space Station";
pub const HOME_SUBTITLE: &str = "Explore Humanity's Home in Space";

pub const INFO_CARDS: [InfoCard; 4] = [
    InfoCard {
        icon: "🚀",
        title: "What is ISS?",
        text: "The ISS is the abbreviation of International Space Station. It is a space \
               station, or a habitable artificial satellite, in low Earth orbit. Its first \
               component was launched into orbit in 1998, with the first long-term residents \
               arriving in November 2000. It has been inhabited continuously since that date.",
    },
    InfoCard {
        icon: "🔬",
        title: "How does ISS work?",
        text: "The ISS serves as a microgravity and space environment research laboratory in \
               which scientific research is conducted in astrobiology, astronomy, meteorology, \
               physics, and other fields. The station is suited for the testing of spacecraft \
               systems and equipment required for missions to the Moon and Mars.",
    },
    InfoCard {
        icon: "🔭",
        title: "How to see ISS?",
        text: "The International Space Station orbits the Earth every 90 minutes. It is \
               visible to the naked eye and can be seen from the ground if you know when and \
               where to look. You can check the schedule of ISS passing over your location on \
               the internet.",
    },
    InfoCard {
        icon: "❓",
        title: "Why do we need ISS?",
        text: "The ISS is crucial for advancing our understanding of living and working in \
               space. It serves as a unique scientific platform for research that benefits \
               life on Earth and prepares us for future space exploration. The station also \
               promotes international cooperation in space exploration.",
    },
];

/// Profile shown on the About screen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub role: String,
    pub bio: String,
    pub links: Vec<ProfileLink>,
    pub sections: Vec<ProfileSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSection {
    pub title: String,
    #[serde(default)]
    pub lines: Vec<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Shardendu Mishra".into(),
            role: "Full-Stack Developer".into(),
            bio: "A Computer Science Engineering student at IIIT Dharwad who's all about building \
                  cool stuff! Passionate about full-stack development and creating seamless user \
                  experiences."
                .into(),
            links: vec![
                ProfileLink {
                    label: "GitHub".into(),
                    url: "https://github.com/MishraShardendu22".into(),
                },
                ProfileLink {
                    label: "LinkedIn".into(),
                    url: "https://www.linkedin.com/in/shardendumishra22/".into(),
                },
            ],
            sections: vec![
                ProfileSection {
                    title: "Skills".into(),
                    lines: vec![
                        "C++, JavaScript, TypeScript, Go, Python, React Native, Express, Next.js, \
                         Fiber, Git, TailwindCSS, SQL, NoSQL, DSA."
                            .into(),
                    ],
                },
                ProfileSection {
                    title: "Experience".into(),
                    lines: vec![
                        "Vice President at Velocity (Developer Club at IIIT Dharwad) - Organizing \
                         events and mentoring fellow developers."
                            .into(),
                        "Developer at Vidkarya - Crafting platforms for digital learning.".into(),
                        "Contributor to Dev Forces - Building a competitive dev platform.".into(),
                    ],
                },
                ProfileSection {
                    title: "Education".into(),
                    lines: vec![
                        "98% in Class 12th from DPS Kalyanpur, Kanpur.".into(),
                        "Pursuing B.Tech in Computer Science at IIIT Dharwad.".into(),
                    ],
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cards_have_content() {
        for card in INFO_CARDS {
            assert!(!card.title.is_empty());
            assert!(card.text.len() > 100);
            assert!(!card.text.contains("  "));
        }
    }

    #[test]
    fn test_profile_override_from_toml() {
        let profile: Profile = toml::from_str(
            r#"
name = "Ada"
links = [{ label = "Site", url = "https://example.org" }]
"#,
        )
        .unwrap();
        assert_eq!(profile.name, "Ada");
        assert_eq!(profile.links.len(), 1);
        assert!(!profile.role.is_empty());
        assert!(!profile.sections.is_empty());
    }

    #[test]
    fn test_default_profile_is_the_creator() {
        let profile = Profile::default();
        assert_eq!(profile.name, "Shardendu Mishra");
        assert_eq!(profile.role, "Full-Stack Developer");
        assert!(profile.bio.starts_with("A Computer Science Engineering student at IIIT Dharwad"));
        assert!(!profile.bio.contains("  "));

        let urls: Vec<&str> = profile.links.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(
            urls,
            [
                "https://github.com/MishraShardendu22",
                "https://www.linkedin.com/in/shardendumishra22/",
            ]
        );

        let titles: Vec<&str> = profile.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["Skills", "Experience", "Education"]);
        assert_eq!(profile.sections[1].lines.len(), 3);
        assert!(profile.sections[0].lines[0].contains("React Native, Express"));
    }
}
