//! Deterministic content generation from topic templates.
//!
//! Selection is index-based on a caller-supplied seed (typically the day
//! of year), so the same seed always yields the same content.

use crate::models::{
    BrollSuggestion, Niche, SegmentKind, TextSegment, Topic, VideoContent, VoiceParams,
};

/// Speaking pace assumed when estimating voiceover duration.
const WORDS_PER_SECOND: f64 = 3.0;

/// Max characters of the hook shown in the opening overlay.
const HOOK_OVERLAY_CHARS: usize = 35;

const AI_TOOLS_SCRIPTS: &[&str] = &[
    "Stop scrolling. {hook} Most people are still doing everything manually. But there's an AI that changes the game completely. It handles tasks that used to take hours and does them in seconds. The interface is simple, the results are instant, and the best part? It keeps learning what works. While others are grinding, this tool is doing the heavy lifting. You upload your work, it optimizes everything automatically. The crazy part? Most people have no idea this exists. This is how top creators are scaling without burning out.",
    "Listen up. {hook} Everyone's talking about AI, but nobody's showing you the tools that actually matter. This one automates the boring stuff so you can focus on what makes money. It's not complicated. You connect it once, set your preferences, and it runs on autopilot. The ROI is insane because it saves you hours every single day. While you're sleeping, it's working. While you're creating, it's optimizing. This is the unfair advantage smart entrepreneurs are using right now.",
    "Real talk. {hook} If you're not using AI in 2026, you're already behind. This specific tool replaces tedious manual work with smart automation. You don't need to be technical. You don't need a huge budget. You just need to set it up once and let it run. The results speak for themselves. Faster output, better quality, zero burnout. This is how you compete with people who have entire teams.",
];

const ONLINE_BUSINESS_SCRIPTS: &[&str] = &[
    "Pay attention. {hook} Most people overcomplicate making money online. They think they need a massive following or thousands of dollars to start. Wrong. You need a laptop, a simple idea, and the willingness to test fast. The strategy is simple. Find a problem people have, solve it better than anyone else, and charge for it. No fancy tools. No complicated funnels. Just value and consistency. The people winning right now? They started small and stayed consistent. You can start today.",
    "Stop scrolling. {hook} The online business game changed in 2026. What used to take months now takes days if you know the shortcuts. You don't need a degree. You don't need experience. You need execution speed and a willingness to learn in public. Pick one business model, go all in for 90 days, track what works. The winners aren't smarter. They're just faster at testing and iterating. This is your sign to stop researching and start building.",
    "Listen. {hook} Everyone's selling you complicated systems and expensive courses. The truth? Making money online is simple but not easy. You need a clear offer, a way to reach people, and relentless consistency. The formula hasn't changed. Solve a painful problem, package your solution, find your audience, and deliver results. Then do it again. And again. That's it. No secrets. No hacks. Just smart work every single day.",
];

const FACELESS_STORIES_SCRIPTS: &[&str] = &[
    "{hook} Nobody saw it coming. Three months ago, everything was different. No audience. No income. Just frustration and doubt. Then one decision changed everything. It wasn't luck. It wasn't some secret strategy. It was consistency mixed with smart pivots. The first month? Crickets. The second month? A few small wins. The third month? Everything clicked. Now the results speak for themselves. But here's what nobody talks about. The late nights. The failures. The moments of wanting to quit. Success isn't a straight line. It's messy. But it's possible.",
    "{hook} This is the part they don't show you on social media. Behind every overnight success is months of invisible work. Early mornings. Late nights. Constant doubt. But then something shifts. You figure out what works. You double down. You stop listening to everyone else and trust your process. The breakthrough doesn't happen when you're comfortable. It happens when you're exhausted but you keep going anyway. That's the real story. Not the highlight reel. The grind that nobody sees.",
    "{hook} Let me tell you what really happened. It started with a simple decision to try something different. No grand plan. No massive investment. Just action. The first attempts failed. Hard. But each failure taught something valuable. Slowly, the pieces started connecting. The audience grew. The income followed. Now? It's a completely different game. But the lesson is clear. You don't need to have it all figured out. You just need to start and adjust as you go.",
];

const CAPTIONS: &[&str] = &[
    "This changed everything 🚀 Comment \"LINK\" for access",
    "The secret nobody talks about 💡 Drop a 🔥 if you needed this",
    "This is how winners do it ⚡ Save this for later",
    "Game changer alert 🎯 Follow for daily tips",
    "Wait for the ending 💥 Comment \"MORE\" for part 2",
];

const BASE_HASHTAGS: &[&str] = &["#fyp", "#viral", "#trending"];

/// Generate the complete content package for a topic.
pub fn generate_video_content(topic: &Topic, seed: u64) -> VideoContent {
    let script = generate_script(topic.niche, topic.hook_format, seed);

    let word_count = script.split_whitespace().count();
    let estimated_duration_secs = (word_count as f64 / WORDS_PER_SECOND).ceil() as u32;

    VideoContent {
        script,
        voice: VoiceParams::default(),
        estimated_duration_secs,
        text_segments: generate_text_segments(topic.hook_format),
        caption: generate_caption(seed),
        hashtags: generate_hashtags(topic.niche),
        broll_suggestions: generate_broll_suggestions(),
    }
}

/// Pick and instantiate the script template for a niche.
pub fn generate_script(niche: Niche, hook: &str, seed: u64) -> String {
    let templates = match niche {
        Niche::AiTools => AI_TOOLS_SCRIPTS,
        Niche::OnlineBusiness => ONLINE_BUSINESS_SCRIPTS,
        Niche::FacelessStories => FACELESS_STORIES_SCRIPTS,
    };
    let template = templates[seed as usize % templates.len()];
    template.replace("{hook}", hook)
}

/// Timed on-screen text cues: hook up front, emphasis beats, a lower-third
/// subtitle. Windows are over the output timeline.
pub fn generate_text_segments(hook: &str) -> Vec<TextSegment> {
    let first_sentence = hook.split('.').next().unwrap_or(hook);
    let hook_text: String = first_sentence.chars().take(HOOK_OVERLAY_CHARS).collect();

    vec![
        TextSegment::new(SegmentKind::Hook, 0.0, 3.5, format!("{} 🔥", hook_text))
            .with_style_hint("huge bold white text with purple glow, centered, drop shadow"),
        TextSegment::new(SegmentKind::Emphasis, 8.0, 12.0, "Game changer ⚡")
            .with_style_hint("bold yellow text with scale-in animation, centered"),
        TextSegment::new(SegmentKind::Subtitle, 15.0, 20.0, "This is the secret")
            .with_style_hint("white text with subtle animation, lower third"),
        TextSegment::new(SegmentKind::Emphasis, 25.0, 30.0, "Start today 🚀")
            .with_style_hint("bold purple text with floating animation, centered"),
    ]
}

/// Pick a caption.
pub fn generate_caption(seed: u64) -> String {
    CAPTIONS[seed as usize % CAPTIONS.len()].to_string()
}

/// Base hashtags plus the niche-specific set.
pub fn generate_hashtags(niche: Niche) -> Vec<String> {
    let niche_tags: &[&str] = match niche {
        Niche::AiTools => &[
            "#AItools",
            "#automation",
            "#productivity",
            "#aiautomation",
            "#techtools",
            "#contentcreation",
        ],
        Niche::OnlineBusiness => &[
            "#makemoneyonline",
            "#sidehustle",
            "#entrepreneur",
            "#businesstips",
            "#onlinebusiness",
            "#passiveincome",
        ],
        Niche::FacelessStories => &[
            "#successstory",
            "#motivation",
            "#entrepreneurship",
            "#businessgrowth",
            "#inspiration",
            "#mindset",
        ],
    };

    BASE_HASHTAGS
        .iter()
        .chain(niche_tags.iter())
        .map(|t| t.to_string())
        .collect()
}

fn generate_broll_suggestions() -> Vec<BrollSuggestion> {
    vec![
        BrollSuggestion {
            time_hint: "0-5s".to_string(),
            description: "Close-up of person looking amazed at phone screen".to_string(),
            source_hint: "stock video".to_string(),
        },
        BrollSuggestion {
            time_hint: "10-18s".to_string(),
            description: "Dynamic screen recording showing the tool/concept in action".to_string(),
            source_hint: "simple UI mockup".to_string(),
        },
        BrollSuggestion {
            time_hint: "24-30s".to_string(),
            description: "Upward trending graph or success visualization".to_string(),
            source_hint: "stock video or motion graphics".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::topics::topic_for_day;

    #[test]
    fn same_seed_yields_same_content() {
        let topic = topic_for_day(7);
        let a = generate_video_content(topic, 7);
        let b = generate_video_content(topic, 7);
        assert_eq!(a, b);
    }

    #[test]
    fn script_embeds_the_hook() {
        let script = generate_script(Niche::AiTools, "This one AI tool works harder.", 0);
        assert!(script.contains("This one AI tool works harder."));
        assert!(!script.contains("{hook}"));
    }

    #[test]
    fn seeds_cycle_through_templates() {
        let hook = "Same hook.";
        let s0 = generate_script(Niche::OnlineBusiness, hook, 0);
        let s1 = generate_script(Niche::OnlineBusiness, hook, 1);
        let s3 = generate_script(Niche::OnlineBusiness, hook, 3);
        assert_ne!(s0, s1);
        assert_eq!(s0, s3);
    }

    #[test]
    fn segments_satisfy_window_invariant() {
        for segment in generate_text_segments("A very long hook line. Second sentence.") {
            assert!(segment.is_valid(), "invalid window: {:?}", segment);
        }
    }

    #[test]
    fn hook_segment_is_truncated_first_sentence() {
        let segments =
            generate_text_segments("Everyone says dropshipping is dead. They're wrong.");
        assert_eq!(segments[0].kind, SegmentKind::Hook);
        assert!(segments[0].text.starts_with("Everyone says dropshipping is dead"));
        assert!(segments[0].text.ends_with("🔥"));
        assert!(segments[0].text.chars().count() <= HOOK_OVERLAY_CHARS + 2);
    }

    #[test]
    fn hashtags_start_with_base_set() {
        let tags = generate_hashtags(Niche::FacelessStories);
        assert_eq!(&tags[..3], &["#fyp", "#viral", "#trending"]);
        assert_eq!(tags.len(), 9);
    }

    #[test]
    fn duration_estimate_tracks_word_count() {
        let topic = topic_for_day(0);
        let content = generate_video_content(topic, 0);
        let words = content.script.split_whitespace().count();
        assert_eq!(
            content.estimated_duration_secs,
            (words as f64 / 3.0).ceil() as u32
        );
    }
}
