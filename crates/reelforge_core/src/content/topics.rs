//! Topic database - rotating content angles across niches.

use crate::models::{Niche, Topic};

/// The rotating topic database, indexed by day of year.
pub const TOPIC_DATABASE: &[Topic] = &[
    // AI tools & automation
    Topic {
        niche: Niche::AiTools,
        angle: "AI tools that replace a whole employee - Opus Clip",
        hook_format: "This one AI tool works harder than 3 employees.",
        target_audience: "Entrepreneurs and creators aged 20-35",
    },
    Topic {
        niche: Niche::AiTools,
        angle: "AI automation that makes money while you sleep - Zapier workflows",
        hook_format: "I built a system that makes money while I sleep. Here's the stupid simple part nobody talks about.",
        target_audience: "Online business owners looking for passive income",
    },
    Topic {
        niche: Niche::AiTools,
        angle: "AI tools to grow on TikTok - VidIQ or similar",
        hook_format: "If your TikToks get 0 views, you're missing this AI tool.",
        target_audience: "Aspiring TikTok creators",
    },
    Topic {
        niche: Niche::AiTools,
        angle: "Underrated AI websites for productivity - Notion AI, Gamma",
        hook_format: "You're 1 habit away from never worrying about productivity again.",
        target_audience: "Remote workers and solopreneurs",
    },
    Topic {
        niche: Niche::AiTools,
        angle: "AI tool that saves 2 hours daily - ChatGPT prompts",
        hook_format: "This 10-second AI hack saves me 2 hours every single day.",
        target_audience: "Busy professionals",
    },
    // Online business / make money
    Topic {
        niche: Niche::OnlineBusiness,
        angle: "Side hustles you can start with a laptop in 1 hour",
        hook_format: "If you have a laptop and 1 free hour a day, you can start this in 2026.",
        target_audience: "People looking for side income",
    },
    Topic {
        niche: Niche::OnlineBusiness,
        angle: "Business models making people rich in 2026",
        hook_format: "This business model is making people rich in 2026 and nobody's talking about it.",
        target_audience: "Aspiring entrepreneurs",
    },
    Topic {
        niche: Niche::OnlineBusiness,
        angle: "Mistakes keeping your business stuck at $0-1k/month",
        hook_format: "If you're still broke after watching money videos, this is why.",
        target_audience: "Struggling online entrepreneurs",
    },
    Topic {
        niche: Niche::OnlineBusiness,
        angle: "How people actually make money from TikTok automation",
        hook_format: "People are making $10k/month on TikTok without showing their face. Here's how.",
        target_audience: "Content creators wanting to monetize",
    },
    Topic {
        niche: Niche::OnlineBusiness,
        angle: "Passive income streams for 2026",
        hook_format: "Stop trading time for money. Here's how to earn while you sleep in 2026.",
        target_audience: "People seeking financial freedom",
    },
    // Faceless storytelling / case studies
    Topic {
        niche: Niche::FacelessStories,
        angle: "How a random guy went from broke to $10k/month in 90 days",
        hook_format: "He was broke 90 days ago. Now he makes $10k/month. Here's what changed.",
        target_audience: "People seeking inspiration and tactics",
    },
    Topic {
        niche: Niche::FacelessStories,
        angle: "Creator who turned one viral video into a full business",
        hook_format: "One viral TikTok changed his entire life. Here's the part nobody saw coming.",
        target_audience: "Content creators",
    },
    Topic {
        niche: Niche::FacelessStories,
        angle: "Story of someone who ignored their finances",
        hook_format: "He ignored this one thing for 5 years. Now he's paying the price.",
        target_audience: "Young adults learning money lessons",
    },
    Topic {
        niche: Niche::FacelessStories,
        angle: "Behind the scenes of a 6-figure online business",
        hook_format: "Everyone sees the results. Nobody talks about the 2 AM breakdowns.",
        target_audience: "Aspiring entrepreneurs",
    },
    Topic {
        niche: Niche::FacelessStories,
        angle: "The truth about quitting your 9-5",
        hook_format: "I quit my job 6 months ago. Here's what they don't tell you.",
        target_audience: "People considering entrepreneurship",
    },
    // Mixed / productivity
    Topic {
        niche: Niche::AiTools,
        angle: "AI tools for content creators - CapCut, Descript",
        hook_format: "If you're still editing videos manually, watch this.",
        target_audience: "Video creators",
    },
    Topic {
        niche: Niche::OnlineBusiness,
        angle: "How to validate a business idea in 48 hours",
        hook_format: "Most people waste months on bad ideas. Here's how to test yours in 2 days.",
        target_audience: "Early-stage entrepreneurs",
    },
    Topic {
        niche: Niche::AiTools,
        angle: "AI writing tools that sound human - Jasper, Copy.ai",
        hook_format: "This AI writes better than most humans. And it takes 30 seconds.",
        target_audience: "Bloggers and content marketers",
    },
    Topic {
        niche: Niche::FacelessStories,
        angle: "How someone built a million-dollar newsletter",
        hook_format: "He sent one email a week. Now it's a million-dollar business.",
        target_audience: "Newsletter creators",
    },
    Topic {
        niche: Niche::OnlineBusiness,
        angle: "The real cost of starting an online business",
        hook_format: "They say you need $10k to start. I did it with $47.",
        target_audience: "Broke aspiring entrepreneurs",
    },
    // Growth hacks
    Topic {
        niche: Niche::AiTools,
        angle: "ChatGPT prompts that actually work for business",
        hook_format: "These 3 ChatGPT prompts make me $500/day. Copy them.",
        target_audience: "AI-curious entrepreneurs",
    },
    Topic {
        niche: Niche::OnlineBusiness,
        angle: "How TikTok Shop is printing money right now",
        hook_format: "TikTok Shop is a goldmine and most people are sleeping on it.",
        target_audience: "E-commerce sellers",
    },
    Topic {
        niche: Niche::FacelessStories,
        angle: "The creator who cracked the algorithm",
        hook_format: "She posted for 6 months with 0 views. Then she changed one thing.",
        target_audience: "Struggling content creators",
    },
    Topic {
        niche: Niche::AiTools,
        angle: "AI image generators for social media - Midjourney, DALL-E",
        hook_format: "Stop paying for stock photos. This AI does it better for free.",
        target_audience: "Social media managers",
    },
    Topic {
        niche: Niche::OnlineBusiness,
        angle: "Newsletter business model breakdown",
        hook_format: "The easiest online business in 2026? Newsletters. Here's why.",
        target_audience: "Writers and creators",
    },
    // Advanced / niche
    Topic {
        niche: Niche::AiTools,
        angle: "AI voice cloning for content - ElevenLabs",
        hook_format: "This AI can clone your voice in 60 seconds. It's terrifying and amazing.",
        target_audience: "Podcasters and video creators",
    },
    Topic {
        niche: Niche::FacelessStories,
        angle: "From zero followers to brand deals in 90 days",
        hook_format: "She had 0 followers 3 months ago. Now brands pay her $5k per post.",
        target_audience: "Micro-influencers",
    },
    Topic {
        niche: Niche::OnlineBusiness,
        angle: "Why most online courses fail (and how to succeed)",
        hook_format: "If your course isn't selling, you're probably making this mistake.",
        target_audience: "Course creators",
    },
    Topic {
        niche: Niche::AiTools,
        angle: "AI coding assistants - GitHub Copilot, Cursor",
        hook_format: "This AI writes better code than junior developers. And it's getting scary good.",
        target_audience: "Developers and tech entrepreneurs",
    },
    Topic {
        niche: Niche::OnlineBusiness,
        angle: "The truth about dropshipping in 2026",
        hook_format: "Everyone says dropshipping is dead. They're wrong. Here's why.",
        target_audience: "E-commerce beginners",
    },
    Topic {
        niche: Niche::FacelessStories,
        angle: "How a solo founder built a SaaS to $50k MRR",
        hook_format: "He built it alone. No co-founder. No investors. Here's the playbook.",
        target_audience: "Technical entrepreneurs",
    },
];

/// Get the topic for a given rotation index (day of year).
pub fn topic_for_day(day_of_year: u32) -> &'static Topic {
    let index = day_of_year as usize % TOPIC_DATABASE.len();
    &TOPIC_DATABASE[index]
}

/// Get topics filtered by niche.
pub fn topics_by_niche(niche: Niche) -> Vec<&'static Topic> {
    TOPIC_DATABASE.iter().filter(|t| t.niche == niche).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_is_deterministic_and_wraps() {
        let len = TOPIC_DATABASE.len() as u32;
        assert_eq!(topic_for_day(0), topic_for_day(len));
        assert_eq!(topic_for_day(3), &TOPIC_DATABASE[3]);
    }

    #[test]
    fn every_niche_has_topics() {
        for niche in Niche::all() {
            assert!(
                !topics_by_niche(*niche).is_empty(),
                "no topics for {}",
                niche
            );
        }
    }

    #[test]
    fn hooks_are_nonempty() {
        for topic in TOPIC_DATABASE {
            assert!(!topic.hook_format.trim().is_empty());
        }
    }
}
