/// Representative English prose walked by the evaluator. Spaces and
/// punctuation break transitions because they are never mapped to a key.
pub const SAMPLE_TEXT: &str = "\
The quick brown fox jumps over the lazy dog while the five boxing wizards \
jump quickly. Typing is a rhythm of small reaches and returns, and most of \
that rhythm is spent on a handful of common letters. In ordinary writing the \
letters e, t, a, o, i and n carry the bulk of the load, and pairs such as th, \
he, in, er, an and re appear again and again in every paragraph. A layout \
that places those letters under the strongest fingers, close to where the \
hands rest, lets a writer move through a sentence with less travel and less \
strain. There is nothing mysterious about this; it follows from the simple \
observation that a finger which does not have to move cannot be slow. \
When we measure the cost of a keyboard we therefore look at how far each \
finger must travel between consecutive letters and how long that movement \
takes. Longer jumps take more time, but not in direct proportion, because the \
hand accelerates quickly and spends most of its effort on the final approach \
to the target. The weaker fingers, the ring finger and especially the little \
finger, are slower still, and a good arrangement asks less of them. \
Consider a short note written to a friend about the weather, the garden, the \
news from the village and the plans for the weekend. Such a note contains \
questions and answers, names and numbers spelled out in words, and the small \
connecting words that hold language together: of, to, and, the, that, with, \
which, from, have, this, there, their, would, should, could. Each of these \
words is typed thousands of times over a working year, so even a modest \
saving on each one adds up to hours. Writers of code, of letters, of reports \
and of stories all share this burden, and every one of them benefits when \
the most frequent motions are also the easiest ones. Journalists quote \
experts, judges review evidence, and engineers explain requirements in \
exhaustive technical vocabulary; the rare letters j, q, x and z still \
matter, but they matter far less than the everyday flow of the common ones.";
