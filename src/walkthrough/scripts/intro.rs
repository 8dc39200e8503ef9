use crate::animation::ease::Ease;
use crate::foundation::core::{Vec3, Vec4};
use crate::foundation::math::lerp_smoothstep;
use crate::render::annotations::draw_text_on_model;
use crate::render::state::{TextAlignHoriz, TextAlignVert, TextOpts};
use crate::walkthrough::scripts::{WalkthroughArgs, set_highlight};

/// Overview: narrate the model, then pick out the input strip, the embedding tables and the
/// first residual block one after another.
pub(super) fn intro_overview(args: &mut WalkthroughArgs<'_>) {
    let WalkthroughArgs {
        layout,
        render,
        camera,
        tools,
        ..
    } = args;

    let (idx_obj, tok_embed, pos_embed, residual0) = (
        layout.idx_obj,
        layout.tok_embed,
        layout.pos_embed,
        layout.residual0,
    );

    let c_model = tools.c_str("nano-gpt", 0.5);
    let c_tokens = tools.c_str("sequence of tokens", 0.5);
    let c_embed = tools.c_str("embedding tables", 0.5);
    let c_resid = tools.c_str("residual stream", 0.5);
    tools.commentary([
        "Welcome! This is a walkthrough of ".into(),
        c_model.into(),
        ", a tiny GPT with only a few thousand parameters. Its input is a ".into(),
        c_tokens.into(),
        ", and each token is turned into a vector with the help of two ".into(),
        c_embed.into(),
        ". The resulting vectors form the ".into(),
        c_resid.into(),
        ", which every later stage reads from and writes back into.".into(),
    ]);

    let t_start = tools.at_time(0.0, 0.0);
    let t_tokens = tools.at_event(c_tokens);
    let mut t_tokens_hl = tools.after_time(&t_tokens, 0.0, 0.8);
    let t_embed = tools.at_event(c_embed);
    let mut t_embed_hl = tools.after_time(&t_embed, 0.0, 0.8);
    let t_resid = tools.at_event(c_resid);
    let t_resid_hl = tools.after_time(&t_resid, 0.0, 0.8);
    let t_settle = tools.after_time(&t_resid_hl, 1.5, 0.5);
    tools.cleanup(&t_settle, [&mut t_tokens_hl, &mut t_embed_hl]);

    tools.move_camera_to(
        camera,
        &t_start,
        Vec3::new(-6.0, 0.0, -80.0),
        Vec3::new(290.0, 38.0, 2.5),
    );
    let resid_mid = layout.get(residual0).map(|b| b.mid());
    if let Some(mid) = resid_mid {
        tools.move_camera_to(camera, &t_embed, mid, Vec3::new(290.0, 20.0, 1.4));
    }

    if t_tokens_hl.active {
        set_highlight(layout, idx_obj, lerp_smoothstep(0.0, 0.4, t_tokens_hl.t));
        if let Some(b) = layout.get(idx_obj) {
            draw_text_on_model(
                render,
                "tokens",
                Vec3::new(b.x - layout.margin / 2.0, b.y + b.dy / 2.0, b.z),
                TextOpts {
                    align: TextAlignHoriz::Right,
                    valign: TextAlignVert::Middle,
                    color: Vec4::new(0.0, 0.0, 0.0, 1.0).mul(t_tokens_hl.eased(Ease::OutQuad)),
                    size: 2.0,
                },
            );
        }
    }

    if t_embed_hl.active {
        let h = Ease::InOutCubic.lerp(&0.0, &0.4, t_embed_hl.t);
        set_highlight(layout, tok_embed, h);
        set_highlight(layout, pos_embed, h);
    }

    // The residual highlight stays up after the earlier ones are retired.
    if t_resid_hl.active {
        let h = lerp_smoothstep(0.0, 0.4, t_resid_hl.t) * (1.0 - 0.5 * t_settle.t);
        set_highlight(layout, residual0, h);
    }
}
